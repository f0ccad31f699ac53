use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::extraction::completeness::CompletenessResult;
use crate::extraction::schema::LOWEST_TIER;

/// A single position held, as extracted by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    #[serde(default, deserialize_with = "lenient::string")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default, deserialize_with = "lenient::string")]
    pub degree_certification: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub institution_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub start_year: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub end_year: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
}

/// A named ability with a proficiency tier. Shared by `skills` and `languages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proficiency {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default = "lowest_tier", deserialize_with = "lenient::level")]
    pub level: String,
}

impl Default for Proficiency {
    fn default() -> Self {
        Self {
            name: None,
            level: lowest_tier(),
        }
    }
}

/// One parsed resume. Built once per upload from the model's JSON and never mutated.
///
/// Decoding is tolerant: absent or mistyped keys come through as `None` or empty
/// lists, and judging what is missing is left to the completeness scorer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub professional_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: Option<String>,
    #[serde(rename = "linkedinURL", default, deserialize_with = "lenient::string")]
    pub linkedin_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub professional_summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub skills: Vec<Proficiency>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub languages: Vec<Proficiency>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub certifications: Vec<String>,
}

/// Sub-field lookup by schema key, used by the completeness scorer.
pub trait SchemaEntry {
    fn sub_field(&self, name: &str) -> Option<&str>;
}

impl SchemaEntry for WorkExperience {
    fn sub_field(&self, name: &str) -> Option<&str> {
        match name {
            "jobTitle" => self.job_title.as_deref(),
            "company" => self.company.as_deref(),
            "location" => self.location.as_deref(),
            "startDate" => self.start_date.as_deref(),
            "endDate" => self.end_date.as_deref(),
            "description" => self.description.as_deref(),
            _ => None,
        }
    }
}

impl SchemaEntry for Education {
    fn sub_field(&self, name: &str) -> Option<&str> {
        match name {
            "degreeCertification" => self.degree_certification.as_deref(),
            "institutionName" => self.institution_name.as_deref(),
            "location" => self.location.as_deref(),
            "startYear" => self.start_year.as_deref(),
            "endYear" => self.end_year.as_deref(),
            "description" => self.description.as_deref(),
            _ => None,
        }
    }
}

impl SchemaEntry for Proficiency {
    fn sub_field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => self.name.as_deref(),
            "level" => Some(self.level.as_str()),
            _ => None,
        }
    }
}

/// A borrowed view of one top-level field, shaped like its schema entry.
pub enum FieldValue<'a> {
    Scalar(Option<&'a str>),
    Records(Vec<&'a dyn SchemaEntry>),
    Strings(&'a [String]),
}

fn records<T: SchemaEntry>(entries: &[T]) -> FieldValue<'_> {
    FieldValue::Records(entries.iter().map(|e| e as &dyn SchemaEntry).collect())
}

impl ExtractedRecord {
    /// Looks up a top-level field by its schema key. `None` for keys outside the schema.
    pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "firstName" => FieldValue::Scalar(self.first_name.as_deref()),
            "lastName" => FieldValue::Scalar(self.last_name.as_deref()),
            "professionalTitle" => FieldValue::Scalar(self.professional_title.as_deref()),
            "email" => FieldValue::Scalar(self.email.as_deref()),
            "phone" => FieldValue::Scalar(self.phone.as_deref()),
            "location" => FieldValue::Scalar(self.location.as_deref()),
            "linkedinURL" => FieldValue::Scalar(self.linkedin_url.as_deref()),
            "website" => FieldValue::Scalar(self.website.as_deref()),
            "professionalSummary" => FieldValue::Scalar(self.professional_summary.as_deref()),
            "workExperience" => records(&self.work_experience),
            "education" => records(&self.education),
            "skills" => records(&self.skills),
            "languages" => records(&self.languages),
            "certifications" => FieldValue::Strings(&self.certifications),
            _ => return None,
        };
        Some(value)
    }
}

/// The response body of `POST /upload`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub extracted_data: ExtractedRecord,
    pub completeness_percentage: u8,
    pub remaining_fields: Vec<String>,
}

impl UploadResult {
    pub fn new(extracted_data: ExtractedRecord, completeness: CompletenessResult) -> Self {
        Self {
            extracted_data,
            completeness_percentage: completeness.percentage,
            remaining_fields: completeness
                .missing_fields
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

fn lowest_tier() -> String {
    LOWEST_TIER.to_string()
}

/// Field deserializers that never reject a value, only downgrade it.
mod lenient {
    use super::*;
    use serde::de::DeserializeOwned;

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    pub fn level<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) if !s.trim().is_empty() => s,
            _ => lowest_tier(),
        })
    }

    /// Non-array values become an empty list; entries that fail to decode become
    /// `T::default()` so they still count against their field.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
            _ => Vec::new(),
        })
    }
}
