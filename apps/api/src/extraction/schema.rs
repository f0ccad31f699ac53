//! Extraction schema: the single table of expected resume fields.
//!
//! Both the prompt builder and the completeness scorer iterate this table, so the
//! fields the model is asked for and the fields a record is scored on cannot drift.

/// Bumped whenever a field, sub-field, or tier list changes.
pub const SCHEMA_VERSION: &str = "1";

/// Skill proficiency tiers, highest first.
pub const SKILL_LEVELS: &[&str] = &["Expert", "Advanced", "Intermediate", "Beginner"];

/// Language proficiency tiers, highest first.
pub const LANGUAGE_LEVELS: &[&str] = &["Native", "Fluent", "Conversational", "Beginner"];

/// Lowest tier shared by skills and languages. Used when the source states no level.
pub const LOWEST_TIER: &str = "Beginner";

/// A key inside a structured list entry (e.g. `jobTitle` inside `workExperience`).
#[derive(Debug)]
pub struct SubField {
    pub name: &'static str,
    pub hint: &'static str,
    /// Entries missing a required sub-field disqualify the whole list.
    pub required: bool,
}

#[derive(Debug)]
pub enum FieldShape {
    /// A single string, `null` when absent.
    Scalar { hint: &'static str },
    /// A list of objects. `tiers` is set for entries carrying a proficiency `level`.
    Records {
        sub_fields: &'static [SubField],
        tiers: Option<&'static [&'static str]>,
    },
    /// A flat list of strings.
    Strings { hint: &'static str },
}

#[derive(Debug)]
pub struct SchemaField {
    pub name: &'static str,
    pub shape: FieldShape,
}

impl SchemaField {
    pub fn required_sub_fields(&self) -> impl Iterator<Item = &'static str> {
        let sub_fields: &'static [SubField] = match &self.shape {
            FieldShape::Records { sub_fields, .. } => *sub_fields,
            _ => &[],
        };
        sub_fields.iter().filter(|s| s.required).map(|s| s.name)
    }
}

const fn scalar(name: &'static str, hint: &'static str) -> SchemaField {
    SchemaField {
        name,
        shape: FieldShape::Scalar { hint },
    }
}

const WORK_EXPERIENCE: &[SubField] = &[
    SubField {
        name: "jobTitle",
        hint: "e.g., 'Senior Software Engineer'",
        required: true,
    },
    SubField {
        name: "company",
        hint: "e.g., 'Google'",
        required: true,
    },
    SubField {
        name: "location",
        hint: "e.g., 'Mountain View, CA'",
        required: false,
    },
    SubField {
        name: "startDate",
        hint: "e.g., 'Jan 2020' or '2020'",
        required: false,
    },
    SubField {
        name: "endDate",
        hint: "e.g., 'Dec 2022' or 'Present' or '2022'",
        required: false,
    },
    SubField {
        name: "description",
        hint: "key responsibilities and achievements, ideally bullet points merged into a string",
        required: false,
    },
];

const EDUCATION: &[SubField] = &[
    SubField {
        name: "degreeCertification",
        hint: "e.g., 'Master of Science in CS', 'AWS Certified Developer Associate'",
        required: true,
    },
    SubField {
        name: "institutionName",
        hint: "e.g., 'Stanford University'",
        required: true,
    },
    SubField {
        name: "location",
        hint: "e.g., 'Stanford, CA'",
        required: false,
    },
    SubField {
        name: "startYear",
        hint: "e.g., '2016'",
        required: false,
    },
    SubField {
        name: "endYear",
        hint: "e.g., '2018' or 'Present'",
        required: false,
    },
    SubField {
        name: "description",
        hint: "relevant coursework, GPA, honors, thesis title, etc.",
        required: false,
    },
];

const SKILL: &[SubField] = &[
    SubField {
        name: "name",
        hint: "e.g., 'Python', 'Data Analysis'",
        required: true,
    },
    SubField {
        name: "level",
        hint: "proficiency tier",
        required: false,
    },
];

const LANGUAGE: &[SubField] = &[
    SubField {
        name: "name",
        hint: "e.g., 'English'",
        required: true,
    },
    SubField {
        name: "level",
        hint: "proficiency tier",
        required: false,
    },
];

/// The fixed field list, in declaration order. Missing-field reports follow this order.
pub static EXTRACTION_SCHEMA: &[SchemaField] = &[
    scalar("firstName", "e.g., 'John'"),
    scalar("lastName", "e.g., 'Doe'"),
    scalar(
        "professionalTitle",
        "e.g., 'Software Engineer', 'Project Manager'",
    ),
    scalar("email", "e.g., 'john.doe@example.com'"),
    scalar("phone", "e.g., '+1-123-456-7890' or '123.456.7890'"),
    scalar("location", "e.g., 'Bengaluru, India' or 'San Francisco, CA'"),
    scalar(
        "linkedinURL",
        "full URL, e.g., 'https://www.linkedin.com/in/johndoe'",
    ),
    scalar("website", "full URL, e.g., 'https://johndoeportfolio.com'"),
    scalar(
        "professionalSummary",
        "concise summary of professional experience and goals",
    ),
    SchemaField {
        name: "workExperience",
        shape: FieldShape::Records {
            sub_fields: WORK_EXPERIENCE,
            tiers: None,
        },
    },
    SchemaField {
        name: "education",
        shape: FieldShape::Records {
            sub_fields: EDUCATION,
            tiers: None,
        },
    },
    SchemaField {
        name: "skills",
        shape: FieldShape::Records {
            sub_fields: SKILL,
            tiers: Some(SKILL_LEVELS),
        },
    },
    SchemaField {
        name: "languages",
        shape: FieldShape::Records {
            sub_fields: LANGUAGE,
            tiers: Some(LANGUAGE_LEVELS),
        },
    },
    SchemaField {
        name: "certifications",
        shape: FieldShape::Strings {
            hint: "standalone certifications not tied to an educational degree, e.g., 'PMP', 'CSM'",
        },
    },
];
