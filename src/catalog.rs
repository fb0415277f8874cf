use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::router::ThemeDetailsParams;

const EMBEDDED_THEMES: &str = include_str!("../data/themes.json");
const EMBEDDED_MODELS: &str = include_str!("../data/models.json");

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThemeImage {
    pub id: i64,
    pub url: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThemeItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub images: Vec<ThemeImage>,
}

impl ThemeItem {
    /// First gallery image, used as the card cover.
    pub fn cover(&self) -> Option<&str> {
        self.images.first().map(|i| i.url.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelItem {
    pub id: String,
    pub name: String,
    pub height: String,
    pub image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformItem {
    pub id: &'static str,
    pub title: &'static str,
    pub price: &'static str,
    pub image: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageItem {
    pub id: &'static str,
    pub title: &'static str,
    pub icon_token: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageDetails {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationEntry {
    pub id: &'static str,
    pub state: &'static str,
    pub cities: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Booked,
    Pending,
    Completed,
}

impl EventStatus {
    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Booked => "Booked",
            EventStatus::Pending => "Pending",
            EventStatus::Completed => "Completed",
        }
    }
}

/// A booked event shown on the Events screen, with its fulfilment tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventItem {
    pub order_id: &'static str,
    pub title: &'static str,
    pub status: EventStatus,
    pub price: f64,
    pub image: &'static str,
    pub steps: usize,
    pub completed_steps: usize,
}

/// A `(label, value)` pair fed to a dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Deserialize)]
struct Document<T> {
    data: Vec<T>,
}

pub const UNIFORMS: &[UniformItem] = &[
    UniformItem { id: "u1", title: "Traditional Uniform", price: "\u{20b9}44,499", image: "uniform-traditional.jpg" },
    UniformItem { id: "u2", title: "Western", price: "\u{20b9}44,499", image: "uniform-western.jpg" },
    UniformItem { id: "u3", title: "Indo-Western", price: "\u{20b9}39,999", image: "uniform-indo-western.jpg" },
    UniformItem { id: "u4", title: "Formal Blazers", price: "\u{20b9}41,250", image: "uniform-blazers.jpg" },
];

pub const PACKAGES: &[PackageItem] = &[
    PackageItem { id: "p1", title: "Diamond Package", icon_token: "diamond-stone" },
    PackageItem { id: "p2", title: "Platinum Package", icon_token: "crown" },
    PackageItem { id: "p3", title: "Gold Package", icon_token: "hexagon-slice-6" },
    PackageItem { id: "p4", title: "Silver Package", icon_token: "hexagon-slice-4" },
    PackageItem { id: "p5", title: "Bronze Package", icon_token: "hexagon-slice-2" },
];

const PACKAGE_DETAILS: &[(&str, PackageDetails)] = &[
    ("p1", PackageDetails {
        title: "Diamond Package",
        description: "Ten hosts, four models, a floor manager and a dedicated makeup artist for the full event.",
    }),
    ("p2", PackageDetails {
        title: "Platinum Package",
        description: "Eight hosts, three models and a floor manager with two wardrobe changes.",
    }),
    ("p3", PackageDetails {
        title: "Gold Package",
        description: "Six hosts and two models with one wardrobe change.",
    }),
    ("p4", PackageDetails {
        title: "Silver Package",
        description: "Four hosts and one model for receptions and registration desks.",
    }),
];

pub const LOCATIONS: &[LocationEntry] = &[
    LocationEntry {
        id: "KA",
        state: "Karnataka",
        cities: &["Bengaluru", "Mysuru", "Mangaluru", "Hubballi", "Belagavi", "Shivamogga", "Tumakuru"],
    },
    LocationEntry {
        id: "MH",
        state: "Maharashtra",
        cities: &["Mumbai", "Pune", "Nagpur", "Nashik", "Thane", "Aurangabad", "Kolhapur"],
    },
    LocationEntry {
        id: "TN",
        state: "Tamil Nadu",
        cities: &["Chennai", "Coimbatore", "Madurai", "Salem", "Tiruchirappalli", "Vellore"],
    },
    LocationEntry {
        id: "DL",
        state: "Delhi",
        cities: &["New Delhi", "Dwarka", "Rohini", "Saket", "Karol Bagh"],
    },
    LocationEntry {
        id: "GJ",
        state: "Gujarat",
        cities: &["Ahmedabad", "Surat", "Vadodara", "Rajkot", "Bhavnagar"],
    },
];

pub const DEMO_EVENTS: &[EventItem] = &[
    EventItem {
        order_id: "#265894",
        title: "South Indian Style Wedding",
        status: EventStatus::Booked,
        price: 75_000.0,
        image: "https://images.unsplash.com/photo-1523438097201-512ae7d59c10",
        steps: 4,
        completed_steps: 3,
    },
    EventItem {
        order_id: "#265911",
        title: "Corporate Gala Evening",
        status: EventStatus::Pending,
        price: 48_500.0,
        image: "https://images.unsplash.com/photo-1511578314322-379afb476865",
        steps: 4,
        completed_steps: 1,
    },
    EventItem {
        order_id: "#264730",
        title: "Sangeet Night",
        status: EventStatus::Completed,
        price: 32_000.0,
        image: "https://images.unsplash.com/photo-1519741497674-611481863552",
        steps: 4,
        completed_steps: 4,
    },
];

/// Read-only lookup tables for the session.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub themes: Vec<ThemeItem>,
    pub models: Vec<ModelItem>,
}

impl Catalog {
    pub fn embedded() -> Result<Self> {
        Ok(Self {
            themes: parse_document(EMBEDDED_THEMES)?,
            models: parse_document(EMBEDDED_MODELS)?,
        })
    }

    /// Load themes and models, preferring `themes.json` / `models.json` from
    /// `dir` when present.
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        let mut catalog = Self::embedded()?;
        if let Some(path) = dir.map(|d| d.join("themes.json")).filter(|p| p.exists()) {
            tracing::info!(path = %path.display(), "loading theme catalog override");
            catalog.themes = parse_document(&std::fs::read_to_string(&path)?)?;
        }
        if let Some(path) = dir.map(|d| d.join("models.json")).filter(|p| p.exists()) {
            tracing::info!(path = %path.display(), "loading model catalog override");
            catalog.models = parse_document(&std::fs::read_to_string(&path)?)?;
        }
        tracing::debug!(
            themes = catalog.themes.len(),
            models = catalog.models.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn theme(&self, id: i64) -> Option<&ThemeItem> {
        self.themes.iter().find(|t| t.id == id)
    }

    pub fn model(&self, id: &str) -> Option<&ModelItem> {
        self.models.iter().find(|m| m.id == id)
    }
}

fn parse_document<T: serde::de::DeserializeOwned>(raw: &str) -> Result<Vec<T>> {
    let doc: Document<T> = serde_json::from_str(raw)?;
    Ok(doc.data)
}

pub fn uniform(id: &str) -> Option<&'static UniformItem> {
    UNIFORMS.iter().find(|u| u.id == id)
}

pub fn package(id: &str) -> Option<&'static PackageItem> {
    PACKAGES.iter().find(|p| p.id == id)
}

/// Descriptive text for a package. Not every package has an entry.
pub fn package_details(id: &str) -> Option<&'static PackageDetails> {
    PACKAGE_DETAILS
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, details)| details)
}

pub fn location(state_id: &str) -> Option<&'static LocationEntry> {
    LOCATIONS.iter().find(|l| l.id == state_id)
}

pub fn state_options() -> Vec<DropdownOption> {
    LOCATIONS
        .iter()
        .map(|l| DropdownOption {
            label: l.state.to_string(),
            value: l.id.to_string(),
        })
        .collect()
}

/// Cities of the selected state. Empty when no state (or an unknown one) is selected.
pub fn city_options(selected_state: Option<&str>) -> Vec<DropdownOption> {
    selected_state
        .and_then(location)
        .map(|l| {
            l.cities
                .iter()
                .map(|c| DropdownOption {
                    label: c.to_string(),
                    value: c.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn theme_details_params(theme: &ThemeItem, color: &str) -> ThemeDetailsParams {
    ThemeDetailsParams {
        id: theme.id.to_string(),
        title: theme.title.clone(),
        description: theme.description.clone(),
        image: theme.cover().unwrap_or_default().to_string(),
        color: color.to_string(),
    }
}

pub fn uniform_details_params(item: &UniformItem, color: &str) -> ThemeDetailsParams {
    ThemeDetailsParams {
        id: item.id.to_string(),
        title: item.title.to_string(),
        description: format!("{} per event day", item.price),
        image: item.image.to_string(),
        color: color.to_string(),
    }
}
