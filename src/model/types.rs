use super::id::InstitutionId;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Classification of an institution.
///
/// The five known labels are the only values the store accepts. Records decoded from
/// elsewhere may carry any other label, which is kept verbatim in `Unrecognized` so it
/// survives a round trip and can be filtered out by the category partitioner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InstitutionType {
    University,
    Polytechnic,
    Faculty,
    Vocational,
    HigherEducationCourse,
    Unrecognized(String),
}

impl InstitutionType {
    /// The known types, in display order.
    pub const KNOWN: [InstitutionType; 5] = [
        InstitutionType::University,
        InstitutionType::Polytechnic,
        InstitutionType::Faculty,
        InstitutionType::Vocational,
        InstitutionType::HigherEducationCourse,
    ];

    pub fn label(&self) -> &str {
        match self {
            InstitutionType::University => "Universidade",
            InstitutionType::Polytechnic => "Politécnico",
            InstitutionType::Faculty => "Faculdade",
            InstitutionType::Vocational => "Profissional",
            InstitutionType::HigherEducationCourse => "Curso Superior",
            InstitutionType::Unrecognized(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, InstitutionType::Unrecognized(_))
    }

    /// Exact, case-sensitive match against the known labels.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Universidade" => InstitutionType::University,
            "Politécnico" => InstitutionType::Polytechnic,
            "Faculdade" => InstitutionType::Faculty,
            "Profissional" => InstitutionType::Vocational,
            "Curso Superior" => InstitutionType::HigherEducationCourse,
            other => InstitutionType::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for InstitutionType {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<InstitutionType> for String {
    fn from(kind: InstitutionType) -> Self {
        kind.label().to_string()
    }
}

impl fmt::Display for InstitutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A stored institution record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    #[serde(rename = "_id")]
    pub id: InstitutionId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: InstitutionType,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "localidade", default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(rename = "endereco", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Free text on purpose: "Gratuito", "Sob consulta" and amounts all occur.
    #[serde(rename = "preco", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(
        rename = "saidasProfissionais",
        default,
        deserialize_with = "career_paths"
    )]
    pub career_paths: Vec<String>,
}

/// An institution before the store has assigned it an identifier.
///
/// This is the shape of seed batches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInstitution {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: InstitutionType,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "localidade", default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(rename = "endereco", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(rename = "preco", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(
        rename = "saidasProfissionais",
        default,
        deserialize_with = "career_paths"
    )]
    pub career_paths: Vec<String>,
}

impl NewInstitution {
    pub fn new(name: impl Into<String>, kind: InstitutionType) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            locality: None,
            address: None,
            website: None,
            price: None,
            career_paths: Vec::new(),
        }
    }

    pub fn with_locality(mut self, locality: impl Into<String>) -> Self {
        self.locality = Some(locality.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_career_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.career_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Attaches an identifier, producing the stored form.
    pub fn into_institution(self, id: InstitutionId) -> Institution {
        Institution {
            id,
            name: self.name,
            kind: self.kind,
            description: self.description,
            locality: self.locality,
            address: self.address,
            website: self.website,
            price: self.price,
            career_paths: self.career_paths,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CareerPathsRepr {
    List(Vec<String>),
    Text(String),
}

/// Accepts both the list shape and the legacy single-string shape.
///
/// A legacy string becomes a one-element list; blank strings and `null` become empty.
fn career_paths<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<CareerPathsRepr>::deserialize(deserializer)?;
    Ok(match repr {
        None => Vec::new(),
        Some(CareerPathsRepr::List(paths)) => paths,
        Some(CareerPathsRepr::Text(text)) if text.trim().is_empty() => Vec::new(),
        Some(CareerPathsRepr::Text(text)) => vec![text],
    })
}
