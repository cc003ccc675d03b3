use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Resource;

/// Portfolio work categories. Wire values are kebab-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Branding,
    UiDesign,
    SocialMedia,
    Packaging,
    Print,
    Motion,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Branding => "branding",
            Category::UiDesign => "ui-design",
            Category::SocialMedia => "social-media",
            Category::Packaging => "packaging",
            Category::Print => "print",
            Category::Motion => "motion",
        };
        f.write_str(s)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "branding" => Ok(Category::Branding),
            "ui-design" => Ok(Category::UiDesign),
            "social-media" => Ok(Category::SocialMedia),
            "packaging" => Ok(Category::Packaging),
            "print" => Ok(Category::Print),
            "motion" => Ok(Category::Motion),
            other => Err(format!("unknown category '{other}'")),
        }
    }
}

/// Category selection for the project listing. `All` is the identity
/// filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(CategoryFilter::All)
        } else {
            s.parse::<Category>().map(CategoryFilter::Only)
        }
    }
}

/// A portfolio project with bilingual copy. `title`/`description` hold the
/// English text, the `*_ar` pair the Arabic text; active projects never
/// have both halves of a pair empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub title: String,
    pub title_ar: String,
    pub description: String,
    pub description_ar: String,
    pub category: Category,
    /// Primary image URL shown on cards.
    pub image: String,
    /// Ordered gallery, never empty.
    pub images: Vec<String>,
    pub client: String,
    pub date: NaiveDate,
    pub featured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub title: String,
    pub title_ar: String,
    pub description: String,
    pub description_ar: String,
    pub category: Category,
    pub image: String,
    pub images: Vec<String>,
    pub client: String,
    pub date: NaiveDate,
    pub featured: bool,
}

impl Resource for Project {
    type Draft = ProjectDraft;

    const PATH: &'static str = "projects";
    const NAME: &'static str = "project";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Project {
    /// Replacement payload carrying the current field values.
    pub fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            title: self.title.clone(),
            title_ar: self.title_ar.clone(),
            description: self.description.clone(),
            description_ar: self.description_ar.clone(),
            category: self.category,
            image: self.image.clone(),
            images: self.images.clone(),
            client: self.client.clone(),
            date: self.date,
            featured: self.featured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_wire_values_are_kebab_case() {
        let json = serde_json::to_string(&Category::UiDesign).unwrap();
        assert_eq!(json, "\"ui-design\"");
        let parsed: Category = serde_json::from_str("\"social-media\"").unwrap();
        assert_eq!(parsed, Category::SocialMedia);
    }

    #[test]
    fn filter_parses_all_and_categories() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "branding".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Branding)
        );
        assert!("posters".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn project_round_trips_camel_case() {
        let raw = r#"{
            "id": 3,
            "title": "Brand book",
            "titleAr": "دليل الهوية",
            "description": "Full identity system",
            "descriptionAr": "نظام هوية متكامل",
            "category": "branding",
            "image": "https://cdn.example.com/p3.jpg",
            "images": ["https://cdn.example.com/p3.jpg"],
            "client": "Dar Studio",
            "date": "2024-03-01",
            "featured": true
        }"#;
        let project: Project = serde_json::from_str(raw).unwrap();
        assert_eq!(project.title_ar, "دليل الهوية");
        assert!(project.featured);
        let back = serde_json::to_value(&project).unwrap();
        assert_eq!(back["titleAr"], "دليل الهوية");
        assert_eq!(back["category"], "branding");
    }
}
