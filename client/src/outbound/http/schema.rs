//! Response schema enforcement.
//!
//! Bodies decode into wire DTOs first; each DTO then converts into its domain
//! type while recording every rule it breaks. Any issue rejects the whole
//! response.

use serde::de::DeserializeOwned;
use tracing::error;

use crate::domain::SchemaValidationError;
use crate::domain::validation::{self, Issues};

/// Conversion from a decoded wire DTO into a domain value.
pub(crate) trait IntoDomain {
    /// Domain value produced on success.
    type Output;

    /// Convert, recording failed rules under `path`.
    ///
    /// Returns `None` only after pushing at least one issue.
    fn into_domain(self, path: &str, issues: &mut Issues) -> Option<Self::Output>;
}

impl<D: IntoDomain> IntoDomain for Vec<D> {
    type Output = Vec<D::Output>;

    fn into_domain(self, path: &str, issues: &mut Issues) -> Option<Self::Output> {
        let converted: Vec<_> = self
            .into_iter()
            .enumerate()
            .map(|(position, item)| item.into_domain(&validation::index(path, position), issues))
            .collect();
        converted.into_iter().collect()
    }
}

/// Decode `body` as `D` and convert it into the domain.
pub(crate) fn parse_response<D>(body: &[u8]) -> Result<D::Output, SchemaValidationError>
where
    D: DeserializeOwned + IntoDomain,
{
    let mut issues = Issues::new();
    let output = match serde_json::from_slice::<D>(body) {
        Ok(decoded) => decoded.into_domain("", &mut issues),
        Err(err) => {
            issues.push("", format!("unexpected response shape: {err}"));
            None
        }
    };

    match output {
        Some(value) if issues.is_empty() => Ok(value),
        _ => {
            let rejection = SchemaValidationError::from_issues(issues);
            error!(
                issues = %rejection.issues(),
                payload = %String::from_utf8_lossy(body),
                "response failed schema validation"
            );
            Err(rejection)
        }
    }
}
