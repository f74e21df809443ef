#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::Utc;
    use reqwest::Client;
    use serde_json::json;
    use uuid::Uuid;

    use crate::{
        admin::models::{AdminQuizSummary, OwnerProfile},
        client::{
            directory_client::{DirectoryClient, DirectoryUser},
            directory_client_error::DirectoryClientError,
        },
        common::models::PagedResponse,
        quiz::models::QuizSummary,
    };

    fn summary(owner_id: &str) -> QuizSummary {
        QuizSummary {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            title: "Capitals".into(),
            description: None,
            question_count: 3,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn profile_uses_primary_email_and_full_name() {
        let user: DirectoryUser = serde_json::from_value(json!({
            "id": "user_1",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "primary_email_address_id": "idn_2",
            "email_addresses": [
                { "id": "idn_1", "email_address": "old@example.com" },
                { "id": "idn_2", "email_address": "ada@example.com" }
            ],
            "image_url": "ignored"
        }))
        .unwrap();

        assert_eq!(
            user.into_profile(),
            OwnerProfile {
                name: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
            }
        );
    }

    #[test]
    fn profile_falls_back_when_details_are_missing() {
        let user: DirectoryUser = serde_json::from_value(json!({
            "id": "user_2",
            "first_name": null,
            "last_name": "",
            "primary_email_address_id": null
        }))
        .unwrap();

        let profile = user.into_profile();
        assert_eq!(profile.name, "Unnamed User");
        assert_eq!(profile.email, "No Email");
    }

    #[test]
    fn unresolved_owner_shows_raw_id() {
        let mut owners = HashMap::new();
        owners.insert(
            "user_known".to_string(),
            OwnerProfile {
                name: "Known Owner".into(),
                email: "known@example.com".into(),
            },
        );

        let page = PagedResponse::new(vec![summary("user_known"), summary("user_gone")], true)
            .map(|quiz| AdminQuizSummary::resolve(quiz, &owners));

        let rows: Vec<(&str, &str)> = page
            .items()
            .iter()
            .map(|row| (row.owner_name.as_str(), row.owner_email.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Known Owner", "known@example.com"),
                ("Unknown User", "user_gone"),
            ]
        );
        assert!(page.has_next());
    }

    #[test]
    fn admin_summary_serializes_flat() {
        let row = AdminQuizSummary::resolve(summary("user_gone"), &HashMap::new());
        let value = serde_json::to_value(&row).unwrap();

        assert_eq!(value["owner_id"], "user_gone");
        assert_eq!(value["question_count"], 3);
        assert_eq!(value["owner_name"], "Unknown User");
        assert!(value.get("quiz").is_none());
    }

    #[tokio::test]
    async fn no_owner_ids_skips_request() {
        let directory = DirectoryClient::new("http://127.0.0.1:9", "sk_test");
        let users = directory.fetch_users(&Client::new(), &[]).await.unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn unreachable_directory_is_an_error() {
        let directory = DirectoryClient::new("http://127.0.0.1:9", "sk_test");
        let result = directory
            .fetch_users(&Client::new(), &["user_1".to_string()])
            .await;

        assert!(matches!(result, Err(DirectoryClientError::Http(_))));
    }
}
