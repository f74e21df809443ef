use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::quiz::models::QuizSummary;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OwnerProfile {
    pub name: String,
    pub email: String,
}

/// Quiz summary with the owner's account details resolved for the admin listing.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminQuizSummary {
    #[serde(flatten)]
    pub quiz: QuizSummary,
    pub owner_name: String,
    pub owner_email: String,
}

impl AdminQuizSummary {
    /// Owners missing from `owners` show as unknown with their raw id in place of an email.
    pub fn resolve(quiz: QuizSummary, owners: &HashMap<String, OwnerProfile>) -> Self {
        let (owner_name, owner_email) = match owners.get(&quiz.owner_id) {
            Some(profile) => (profile.name.clone(), profile.email.clone()),
            None => ("Unknown User".to_string(), quiz.owner_id.clone()),
        };

        Self {
            quiz,
            owner_name,
            owner_email,
        }
    }
}
