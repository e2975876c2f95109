//! Static copy and row data for the two listing scenes.
//!
//! Kept apart from layout so a scene's text can change without touching
//! any coordinates.

use std::fmt;
use std::str::FromStr;

use crate::style::{Accent, Palette};

/// Payment state of an invoice row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Overdue,
}

impl InvoiceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Overdue => "Overdue",
        }
    }

    pub fn accent(&self) -> Accent {
        match self {
            InvoiceStatus::Paid => Accent::Green,
            InvoiceStatus::Pending => Accent::Yellow,
            InvoiceStatus::Overdue => Accent::Red,
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InvoiceStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Paid" => Ok(InvoiceStatus::Paid),
            "Pending" => Ok(InvoiceStatus::Pending),
            "Overdue" => Ok(InvoiceStatus::Overdue),
            _ => Err(()),
        }
    }
}

/// Colour for a status label, or `None` for labels that are not a status.
pub fn status_color(status: &str) -> Option<crate::color::Rgb8> {
    let status: InvoiceStatus = status.parse().ok()?;
    Some(Palette::DIGITAL_PRECISION.accent(status.accent()))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceRow {
    pub number: &'static str,
    pub client: &'static str,
    /// Issue date; the compact table has no date column.
    pub date: Option<&'static str>,
    pub amount: &'static str,
    pub status: InvoiceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: &'static str,
    pub caption: Option<&'static str>,
    pub accent: Accent,
    /// Short glyph drawn before the value.
    pub icon: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockItem {
    pub name: &'static str,
    pub quantity: &'static str,
    pub reorder: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickAction {
    pub label: &'static str,
    pub accent: Accent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feature {
    pub title: &'static str,
    pub description: Option<&'static str>,
    pub accent: Accent,
}

/// Everything the dashboard mockup shows.
#[derive(Debug, Clone, Copy)]
pub struct DashboardContent {
    pub app_name: &'static str,
    pub page_title: &'static str,
    pub nav_items: &'static [&'static str],
    pub active_nav: &'static str,
    pub collected: &'static str,
    pub collected_label: &'static str,
    pub cards: &'static [StatCard],
    pub table_title: &'static str,
    pub columns: &'static [&'static str],
    pub invoices: &'static [InvoiceRow],
    pub actions_title: &'static str,
    pub actions: &'static [QuickAction],
    pub stock_title: &'static str,
    pub low_stock: &'static [StockItem],
}

/// Marketing copy around the mockup.
#[derive(Debug, Clone, Copy)]
pub struct ListingCopy {
    pub title: &'static str,
    pub tagline: &'static str,
    pub slogan: &'static str,
    pub badge: &'static str,
    pub platform: &'static str,
    pub brand: &'static str,
    pub version: &'static str,
    pub features: &'static [Feature],
}

#[derive(Debug, Clone, Copy)]
pub struct Content {
    pub dashboard: DashboardContent,
    pub copy: ListingCopy,
}

// ============================================================================
// Scene data
// ============================================================================

const NAV_ITEMS: &[&str] = &["Dashboard", "Invoices", "Clients", "Items", "Settings"];

const fn row(
    number: &'static str,
    client: &'static str,
    date: Option<&'static str>,
    amount: &'static str,
    status: InvoiceStatus,
) -> InvoiceRow {
    InvoiceRow {
        number,
        client,
        date,
        amount,
        status,
    }
}

const fn card(
    label: &'static str,
    value: &'static str,
    caption: Option<&'static str>,
    accent: Accent,
    icon: Option<&'static str>,
) -> StatCard {
    StatCard {
        label,
        value,
        caption,
        accent,
        icon,
    }
}

/// Laptop scene: compact dashboard, four stat cards, four invoices.
pub const LAPTOP: Content = Content {
    dashboard: DashboardContent {
        app_name: "Invoice Creator",
        page_title: "Dashboard",
        nav_items: NAV_ITEMS,
        active_nav: "Dashboard",
        collected: "$9,875",
        collected_label: "collected",
        cards: &[
            card("Total Billed", "$12,450.00", None, Accent::Blue, None),
            card("Collected", "$9,875.00", None, Accent::Green, None),
            card("This Month", "$2,340.00", None, Accent::Green, None),
            card("Unpaid", "$2,575.00", None, Accent::Yellow, None),
        ],
        table_title: "Recent Invoices",
        columns: &["Invoice #", "Client", "Amount", "Status"],
        invoices: &[
            row("INV-2025-042", "Smith & Co.", None, "$1,250.00", InvoiceStatus::Paid),
            row("INV-2025-041", "Tech Solutions", None, "$3,400.00", InvoiceStatus::Paid),
            row("INV-2025-040", "Design Studio", None, "$875.00", InvoiceStatus::Pending),
            row("INV-2025-039", "Local Bakery", None, "$425.00", InvoiceStatus::Pending),
        ],
        actions_title: "Quick Actions",
        actions: &[],
        stock_title: "Low Stock Alert",
        low_stock: &[],
    },
    copy: ListingCopy {
        title: "INVOICE CREATOR",
        tagline: "Professional Invoice Management",
        slogan: "Simple. Professional. Powerful.",
        badge: "DIGITAL DOWNLOAD",
        platform: "Windows 10+",
        brand: "Blue Line Scannables",
        version: "v1.3.3",
        features: &[
            Feature {
                title: "Invoice Management",
                description: None,
                accent: Accent::Blue,
            },
            Feature {
                title: "Client Tracking",
                description: None,
                accent: Accent::Green,
            },
            Feature {
                title: "Inventory Control",
                description: None,
                accent: Accent::Yellow,
            },
        ],
    },
};

/// Monitor scene: full dashboard with navigation and side panels.
pub const MONITOR: Content = Content {
    dashboard: DashboardContent {
        app_name: "Invoice Creator",
        page_title: "Dashboard",
        nav_items: NAV_ITEMS,
        active_nav: "Dashboard",
        collected: "$9,875",
        collected_label: "collected",
        cards: &[
            card("Total Billed", "$12,450", Some("all time"), Accent::Blue, None),
            card("Collected", "$9,875", Some("+$2,340 this month"), Accent::Green, Some("\u{25B2}")),
            card("Outstanding", "$2,575", Some("3 invoices"), Accent::Yellow, None),
            card("Overdue", "$425", Some("1 invoice"), Accent::Red, Some("!")),
        ],
        table_title: "Recent Invoices",
        columns: &["Invoice", "Client", "Date", "Amount", "Status"],
        invoices: &[
            row("INV-2025-042", "Smith & Co.", Some("Jan 22"), "$1,250.00", InvoiceStatus::Paid),
            row("INV-2025-041", "Tech Solutions LLC", Some("Jan 20"), "$3,400.00", InvoiceStatus::Paid),
            row("INV-2025-040", "Design Studio", Some("Jan 18"), "$875.00", InvoiceStatus::Pending),
            row("INV-2025-039", "Local Bakery", Some("Jan 15"), "$425.00", InvoiceStatus::Overdue),
            row("INV-2025-038", "Metro Services", Some("Jan 12"), "$2,100.00", InvoiceStatus::Paid),
        ],
        actions_title: "Quick Actions",
        actions: &[
            QuickAction {
                label: "+ New Invoice",
                accent: Accent::Blue,
            },
            QuickAction {
                label: "+ Add Client",
                accent: Accent::Green,
            },
            QuickAction {
                label: "+ Add Item",
                accent: Accent::Neutral,
            },
        ],
        stock_title: "Low Stock Alert",
        low_stock: &[
            StockItem {
                name: "Blank Knives",
                quantity: "3 left",
                reorder: "reorder: 5",
            },
            StockItem {
                name: "Gift Boxes",
                quantity: "2 left",
                reorder: "reorder: 10",
            },
        ],
    },
    copy: ListingCopy {
        title: "INVOICE CREATOR",
        tagline: "Professional Invoice Management for Small Business",
        slogan: "Simple. Professional. Powerful.",
        badge: "DIGITAL DOWNLOAD",
        platform: "Windows 10+",
        brand: "Blue Line Scannables",
        version: "v1.3.3",
        features: &[
            Feature {
                title: "Invoice Management",
                description: Some("Create & track invoices"),
                accent: Accent::Blue,
            },
            Feature {
                title: "Client Database",
                description: Some("Store client info"),
                accent: Accent::Green,
            },
            Feature {
                title: "Inventory Control",
                description: Some("Track stock levels"),
                accent: Accent::Yellow,
            },
        ],
    },
};
