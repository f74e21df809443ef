use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    common::{error::ServerError, models::PagedResponse},
    quiz::models::{
        CreateQuizRequest, OptionRow, QuestionRequest, QuestionRow, Quiz, QuizRow, QuizSummary,
        UpdateQuizRequest,
    },
};

pub async fn create_quiz(
    pool: &Pool<Postgres>,
    owner_id: &str,
    request: &CreateQuizRequest,
) -> Result<Uuid, ServerError> {
    let quiz_id = Uuid::new_v4();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO "quiz" (id, owner_id, title, description)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(quiz_id)
    .bind(owner_id)
    .bind(request.title.trim())
    .bind(&request.description)
    .execute(&mut *tx)
    .await?;

    for (position, question) in request.questions.iter().enumerate() {
        tx_insert_question(&mut tx, &quiz_id, position as i32, question).await?;
    }

    tx.commit().await?;
    Ok(quiz_id)
}

async fn tx_insert_question(
    tx: &mut Transaction<'_, Postgres>,
    quiz_id: &Uuid,
    position: i32,
    question: &QuestionRequest,
) -> Result<Uuid, ServerError> {
    let question_id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO "question" (id, quiz_id, position, text, question_type)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(question_id)
    .bind(quiz_id)
    .bind(position)
    .bind(question.text.trim())
    .bind(question.question_type)
    .execute(&mut **tx)
    .await?;

    tx_insert_options(tx, &question_id, question).await?;
    Ok(question_id)
}

async fn tx_insert_options(
    tx: &mut Transaction<'_, Postgres>,
    question_id: &Uuid,
    question: &QuestionRequest,
) -> Result<(), ServerError> {
    for (position, text) in question.options.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO "answer_option" (id, question_id, position, text, is_correct)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(question_id)
        .bind(position as i32)
        .bind(text.trim())
        .bind(question.is_correct(position))
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

pub async fn get_quiz_by_id(
    pool: &Pool<Postgres>,
    quiz_id: &Uuid,
) -> Result<Option<Quiz>, sqlx::Error> {
    let Some(quiz) = sqlx::query_as::<_, QuizRow>(
        r#"
        SELECT id, owner_id, title, description, created_at
        FROM "quiz"
        WHERE id = $1
        "#,
    )
    .bind(quiz_id)
    .fetch_optional(pool)
    .await?
    else {
        return Ok(None);
    };

    let questions = sqlx::query_as::<_, QuestionRow>(
        r#"
        SELECT id, quiz_id, text, question_type
        FROM "question"
        WHERE quiz_id = $1
        ORDER BY position
        "#,
    )
    .bind(quiz_id)
    .fetch_all(pool)
    .await?;

    let options = sqlx::query_as::<_, OptionRow>(
        r#"
        SELECT o.id, o.question_id, o.text, o.is_correct
        FROM "answer_option" o
        JOIN "question" q ON q.id = o.question_id
        WHERE q.quiz_id = $1
        ORDER BY q.position, o.position
        "#,
    )
    .bind(quiz_id)
    .fetch_all(pool)
    .await?;

    Ok(Some(Quiz::from_rows(quiz, questions, options)))
}

pub async fn get_quiz_owner(
    pool: &Pool<Postgres>,
    quiz_id: &Uuid,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT owner_id
        FROM "quiz"
        WHERE id = $1
        "#,
    )
    .bind(quiz_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_question_owner(
    pool: &Pool<Postgres>,
    question_id: &Uuid,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT qz.owner_id
        FROM "question" q
        JOIN "quiz" qz ON qz.id = q.quiz_id
        WHERE q.id = $1
        "#,
    )
    .bind(question_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_quizzes_by_owner(
    pool: &Pool<Postgres>,
    owner_id: &str,
) -> Result<Vec<QuizSummary>, sqlx::Error> {
    sqlx::query_as::<_, QuizSummary>(
        r#"
        SELECT qz.id, qz.owner_id, qz.title, qz.description, qz.created_at,
            COUNT(q.id) AS question_count
        FROM "quiz" qz
        LEFT JOIN "question" q ON q.quiz_id = qz.id
        WHERE qz.owner_id = $1
        GROUP BY qz.id
        ORDER BY qz.created_at DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

pub async fn list_all_quizzes(
    pool: &Pool<Postgres>,
    page_num: u16,
    page_size: u16,
) -> Result<PagedResponse<QuizSummary>, sqlx::Error> {
    let limit = i64::from(page_size) + 1;
    let offset = i64::from(page_size) * i64::from(page_num);

    let quizzes = sqlx::query_as::<_, QuizSummary>(
        r#"
        SELECT qz.id, qz.owner_id, qz.title, qz.description, qz.created_at,
            COUNT(q.id) AS question_count
        FROM "quiz" qz
        LEFT JOIN "question" q ON q.quiz_id = qz.id
        GROUP BY qz.id
        ORDER BY qz.created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(PagedResponse::from_overfetch(quizzes, page_size as usize))
}

pub async fn update_quiz(
    pool: &Pool<Postgres>,
    quiz_id: &Uuid,
    request: &UpdateQuizRequest,
) -> Result<(), ServerError> {
    let row = sqlx::query(
        r#"
        UPDATE "quiz"
        SET title = $1, description = $2
        WHERE id = $3
        "#,
    )
    .bind(request.title.trim())
    .bind(&request.description)
    .bind(quiz_id)
    .execute(pool)
    .await?;

    if row.rows_affected() == 0 {
        return Err(ServerError::NotFound(format!(
            "Quiz with id {} does not exist",
            quiz_id
        )));
    }

    Ok(())
}

pub async fn delete_quiz(pool: &Pool<Postgres>, quiz_id: &Uuid) -> Result<(), ServerError> {
    let row = sqlx::query(
        r#"
        DELETE FROM "quiz"
        WHERE id = $1
        "#,
    )
    .bind(quiz_id)
    .execute(pool)
    .await?;

    if row.rows_affected() == 0 {
        return Err(ServerError::NotFound(format!(
            "Quiz with id {} does not exist",
            quiz_id
        )));
    }

    Ok(())
}

pub async fn add_question(
    pool: &Pool<Postgres>,
    quiz_id: &Uuid,
    question: &QuestionRequest,
) -> Result<Uuid, ServerError> {
    let mut tx = pool.begin().await?;

    // Serializes concurrent appends to the same quiz
    sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id
        FROM "quiz"
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(quiz_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(ServerError::NotFound(format!(
        "Quiz with id {} does not exist",
        quiz_id
    )))?;

    let position = sqlx::query_scalar::<_, i32>(
        r#"
        SELECT COALESCE(MAX(position) + 1, 0)
        FROM "question"
        WHERE quiz_id = $1
        "#,
    )
    .bind(quiz_id)
    .fetch_one(&mut *tx)
    .await?;

    let question_id = tx_insert_question(&mut tx, quiz_id, position, question).await?;
    tx.commit().await?;

    Ok(question_id)
}

/// Replaces text, type and every option of the question.
pub async fn update_question(
    pool: &Pool<Postgres>,
    question_id: &Uuid,
    question: &QuestionRequest,
) -> Result<(), ServerError> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        DELETE FROM "answer_option"
        WHERE question_id = $1
        "#,
    )
    .bind(question_id)
    .execute(&mut *tx)
    .await?;

    let row = sqlx::query(
        r#"
        UPDATE "question"
        SET text = $1, question_type = $2
        WHERE id = $3
        "#,
    )
    .bind(question.text.trim())
    .bind(question.question_type)
    .bind(question_id)
    .execute(&mut *tx)
    .await?;

    if row.rows_affected() == 0 {
        return Err(ServerError::NotFound(format!(
            "Question with id {} does not exist",
            question_id
        )));
    }

    tx_insert_options(&mut tx, question_id, question).await?;
    tx.commit().await?;

    Ok(())
}

pub async fn delete_question(pool: &Pool<Postgres>, question_id: &Uuid) -> Result<(), ServerError> {
    let row = sqlx::query(
        r#"
        DELETE FROM "question"
        WHERE id = $1
        "#,
    )
    .bind(question_id)
    .execute(pool)
    .await?;

    if row.rows_affected() == 0 {
        return Err(ServerError::NotFound(format!(
            "Question with id {} does not exist",
            question_id
        )));
    }

    Ok(())
}
