use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::validation;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Category {
    pub(crate) id: i64,
    pub(crate) title: String,
}

/// One row of the "categories with at least one published post" aggregate.
#[derive(Debug, Clone)]
pub(crate) struct CategoryPostCount {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) post_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CategoryRequest {
    pub(crate) title: String,
}

impl CategoryRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        match validation::category_title(&self.title) {
            Ok(title) => Ok(Self { title }),
            Err(err) => Err(DomainError::Validation(vec![err])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CategoryRequest;

    #[test]
    fn category_request_trims_the_title() {
        let req = CategoryRequest {
            title: "  Tech  ".to_string(),
        };
        assert_eq!(req.validate().expect("must be valid").title, "Tech");
    }

    #[test]
    fn category_request_rejects_short_titles() {
        let req = CategoryRequest {
            title: "ab".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
