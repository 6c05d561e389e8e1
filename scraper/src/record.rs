use serde::{Deserialize, Serialize};

/// Placeholder written for any field the listing markup does not carry.
pub const ABSENT: &str = "N/A";

/// Column title of the per-run date stamp.
pub const SCRAPE_DATE: &str = "Scrape Date";

/// The ten fields read from each result card, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Gender,
    Breed,
    Age,
    AnimalType,
    Weight,
    BroughtToShelter,
    LocatedAt,
    KennelLocation,
    QualifiedFor,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Name,
        Field::Gender,
        Field::Breed,
        Field::Age,
        Field::AnimalType,
        Field::Weight,
        Field::BroughtToShelter,
        Field::LocatedAt,
        Field::KennelLocation,
        Field::QualifiedFor,
    ];

    /// Column title used in the dataset header.
    pub fn title(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Gender => "Gender",
            Field::Breed => "Breed",
            Field::Age => "Age",
            Field::AnimalType => "Animal Type",
            Field::Weight => "Weight",
            Field::BroughtToShelter => "Brought to Shelter",
            Field::LocatedAt => "Located At",
            Field::KennelLocation => "Kennel Location",
            Field::QualifiedFor => "Qualified For",
        }
    }

    /// Class carried by the `span.results` element holding this field.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "text_Name",
            Field::Gender => "text_Gender",
            Field::Breed => "text_Breed",
            Field::Age => "text_Age",
            Field::AnimalType => "text_Animaltype",
            Field::Weight => "text_Weight",
            Field::BroughtToShelter => "text_Broughttotheshelter",
            Field::LocatedAt => "text_Locatedat",
            Field::KennelLocation => "text_KennelLocation",
            Field::QualifiedFor => "text_ViewType",
        }
    }
}

/// Header row of the dataset: the ten listing fields followed by the scrape date.
pub fn columns() -> Vec<&'static str> {
    Field::ALL
        .iter()
        .map(|field| field.title())
        .chain(std::iter::once(SCRAPE_DATE))
        .collect()
}

/// One listed animal as read from a result card.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnimalRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Breed")]
    pub breed: String,
    #[serde(rename = "Age")]
    pub age: String,
    #[serde(rename = "Animal Type")]
    pub animal_type: String,
    #[serde(rename = "Weight")]
    pub weight: String,
    #[serde(rename = "Brought to Shelter")]
    pub brought_to_shelter: String,
    #[serde(rename = "Located At")]
    pub located_at: String,
    #[serde(rename = "Kennel Location")]
    pub kennel_location: String,
    #[serde(rename = "Qualified For")]
    pub qualified_for: String,
}

impl Default for AnimalRecord {
    fn default() -> Self {
        Self {
            name: ABSENT.to_string(),
            gender: ABSENT.to_string(),
            breed: ABSENT.to_string(),
            age: ABSENT.to_string(),
            animal_type: ABSENT.to_string(),
            weight: ABSENT.to_string(),
            brought_to_shelter: ABSENT.to_string(),
            located_at: ABSENT.to_string(),
            kennel_location: ABSENT.to_string(),
            qualified_for: ABSENT.to_string(),
        }
    }
}

impl AnimalRecord {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Gender => &self.gender,
            Field::Breed => &self.breed,
            Field::Age => &self.age,
            Field::AnimalType => &self.animal_type,
            Field::Weight => &self.weight,
            Field::BroughtToShelter => &self.brought_to_shelter,
            Field::LocatedAt => &self.located_at,
            Field::KennelLocation => &self.kennel_location,
            Field::QualifiedFor => &self.qualified_for,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Gender => &mut self.gender,
            Field::Breed => &mut self.breed,
            Field::Age => &mut self.age,
            Field::AnimalType => &mut self.animal_type,
            Field::Weight => &mut self.weight,
            Field::BroughtToShelter => &mut self.brought_to_shelter,
            Field::LocatedAt => &mut self.located_at,
            Field::KennelLocation => &mut self.kennel_location,
            Field::QualifiedFor => &mut self.qualified_for,
        };
        *slot = value;
    }

    /// Number of fields that were found in the markup.
    pub fn matched_fields(&self) -> usize {
        Field::ALL
            .iter()
            .filter(|field| self.get(**field) != ABSENT)
            .count()
    }

    /// Values in column order, without the scrape date.
    pub fn values(&self) -> Vec<&str> {
        Field::ALL.iter().map(|field| self.get(*field)).collect()
    }
}
