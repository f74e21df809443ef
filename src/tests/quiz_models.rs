#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::Utc;
    use uuid::Uuid;

    use crate::{
        common::{error::ServerError, models::PagedResponse},
        quiz::models::{
            CreateQuizRequest, OptionRow, QuestionRequest, QuestionRow, QuestionType, Quiz,
            QuizRow, UpdateQuizRequest,
        },
    };

    fn question(
        question_type: QuestionType,
        options: &[&str],
        correct: &[usize],
    ) -> QuestionRequest {
        QuestionRequest {
            text: "Which ones?".into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_indices: correct.to_vec(),
            question_type,
        }
    }

    #[test]
    fn accepts_well_formed_questions() {
        assert!(question(QuestionType::Single, &["A", "B"], &[1]).validate().is_ok());
        assert!(question(QuestionType::Multiple, &["A", "B", "C"], &[0, 2]).validate().is_ok());
        assert!(question(QuestionType::Multiple, &["A", "B"], &[0]).validate().is_ok());
    }

    #[test]
    fn rejects_malformed_questions() {
        let too_few = question(QuestionType::Single, &["A"], &[0]);
        let blank_option = question(QuestionType::Single, &["A", "  "], &[0]);
        let out_of_range = question(QuestionType::Multiple, &["A", "B"], &[0, 2]);
        let none_correct = question(QuestionType::Multiple, &["A", "B"], &[]);
        let two_single = question(QuestionType::Single, &["A", "B"], &[0, 1]);
        let mut blank_text = question(QuestionType::Single, &["A", "B"], &[0]);
        blank_text.text = "   ".into();

        for request in [too_few, blank_option, out_of_range, none_correct, two_single, blank_text] {
            assert!(request.validate().is_err(), "{:?}", request);
        }
    }

    #[test]
    fn repeated_correct_index_counts_once() {
        assert!(question(QuestionType::Single, &["A", "B"], &[1, 1]).validate().is_ok());
    }

    #[test]
    fn question_type_defaults_to_single() {
        let request: QuestionRequest = serde_json::from_value(serde_json::json!({
            "text": "Q",
            "options": ["A", "B"],
            "correct_indices": [0]
        }))
        .unwrap();

        assert_eq!(request.question_type, QuestionType::Single);
    }

    #[test]
    fn question_type_uses_uppercase_names() {
        let json = serde_json::to_string(&QuestionType::Multiple).unwrap();
        assert_eq!(json, "\"MULTIPLE\"");
    }

    #[test]
    fn title_needs_three_characters() {
        let short = UpdateQuizRequest {
            title: " ab ".into(),
            description: None,
        };
        let ok = CreateQuizRequest {
            title: "abc".into(),
            description: Some("General knowledge".into()),
            questions: vec![],
        };

        assert!(short.validate().is_err());
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn title_fits_column_width() {
        let longest = UpdateQuizRequest {
            title: "é".repeat(200),
            description: None,
        };
        let overlong = CreateQuizRequest {
            title: "q".repeat(201),
            description: None,
            questions: vec![],
        };

        assert!(longest.validate().is_ok());
        assert!(matches!(
            overlong.validate(),
            Err(ServerError::Validation(_))
        ));
    }

    #[test]
    fn assembles_quiz_in_row_order() {
        let quiz_id = Uuid::new_v4();
        let (q1, q2) = (Uuid::new_v4(), Uuid::new_v4());
        let option = |question_id: Uuid, text: &str, is_correct: bool| OptionRow {
            id: Uuid::new_v4(),
            question_id,
            text: text.into(),
            is_correct,
        };

        let quiz = Quiz::from_rows(
            QuizRow {
                id: quiz_id,
                owner_id: "user_owner".into(),
                title: "Rows".into(),
                description: None,
                created_at: Utc::now(),
            },
            vec![
                QuestionRow {
                    id: q1,
                    quiz_id,
                    text: "First".into(),
                    question_type: QuestionType::Single,
                },
                QuestionRow {
                    id: q2,
                    quiz_id,
                    text: "Second".into(),
                    question_type: QuestionType::Multiple,
                },
            ],
            vec![
                option(q1, "A", true),
                option(q1, "B", false),
                option(q2, "X", true),
                option(q2, "Y", true),
                option(q2, "Z", false),
            ],
        );

        let texts: Vec<&str> = quiz.questions.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["First", "Second"]);

        let second: Vec<&str> = quiz.questions[1].options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(second, vec!["X", "Y", "Z"]);

        let correct: HashSet<Uuid> = quiz.questions[1].correct_option_ids();
        assert_eq!(correct.len(), 2);
    }

    #[test]
    fn page_drops_overfetched_row() {
        let page = PagedResponse::from_overfetch(vec![1, 2, 3], 2);
        assert_eq!(page.items(), &[1, 2]);
        assert!(page.has_next());

        let last = PagedResponse::from_overfetch(vec![1, 2], 2);
        assert_eq!(last.items(), &[1, 2]);
        assert!(!last.has_next());
    }
}
