use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use rating_engine::config::{DatabaseConfig, EngineConfig};
use rating_engine::errors::RatingError;
use rating_engine::models::formulas::requests::CreateFormulaRequest;
use rating_engine::models::rating_types::{
    entities::{LikertRatingType, NumericRatingType, statement_slots},
    requests::{
        CreateLikertRatingTypeRequest, CreateNumericRatingTypeRequest,
        UpdateLikertRatingTypeRequest, UpdateNumericRatingTypeRequest,
    },
};
use rating_engine::models::ratings::{entities::Rating, requests::CreateRatingRequest};
use rating_engine::models::submissions::{
    entities::{IdentityKey, NewSubmission, Tagging},
    requests::{
        MarketplaceSubmissionRequest, RatingValueInput, SubmitRatingsRequest,
        UpdateSubmissionRequest,
    },
    responses::{LikertStatementSummary, RatingSummary},
};
use rating_engine::services::notifications::log::LogNotifier;
use rating_engine::services::{RatingEngine, StoreGuard};
use rating_engine::storage::SubmissionStore;
use rating_engine::storage::sea_orm_storage::SeaOrmStorage;

async fn setup() -> (Arc<SeaOrmStorage>, RatingEngine) {
    let config = DatabaseConfig {
        url: ":memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    let storage = Arc::new(SeaOrmStorage::connect(&config).await.unwrap());
    let engine = RatingEngine::new(
        storage.clone(),
        Arc::new(LogNotifier),
        &EngineConfig::default(),
    );
    (storage, engine)
}

async fn star_type(engine: &RatingEngine) -> NumericRatingType {
    engine
        .rating_types
        .create_numeric_rating_type(CreateNumericRatingTypeRequest {
            type_code: "STAR".into(),
            description: Some("1 to 5 stars".into()),
            min_score: 1,
            max_score: 5,
            scale: 0,
            intervals: 5,
            status: None,
        })
        .await
        .unwrap()
}

async fn likert_type(engine: &RatingEngine, statements: &[&str]) -> LikertRatingType {
    engine
        .rating_types
        .create_likert_rating_type(CreateLikertRatingTypeRequest {
            type_code: format!("REASON_{}", statements.len()),
            description: None,
            num_statements: statements.len() as i32,
            statements: statement_slots(statements),
            status: None,
        })
        .await
        .unwrap()
}

async fn rating_for(engine: &RatingEngine, rating_type_id: &str, source_uid: &str) -> Rating {
    engine
        .ratings
        .create_rating(CreateRatingRequest {
            source_type: "doctor".into(),
            source_uid: source_uid.into(),
            rating_type_id: rating_type_id.into(),
            comment_allowed: None,
        })
        .await
        .unwrap()
}

fn classic(user_id: &str, trans: &str, ratings: &[(&str, &str)]) -> SubmitRatingsRequest {
    SubmitRatingsRequest {
        user_id: Some(user_id.into()),
        user_id_legacy: None,
        source_trans_id: trans.into(),
        comment: None,
        media: Vec::new(),
        ratings: ratings
            .iter()
            .map(|(rating_id, value)| RatingValueInput {
                rating_id: (*rating_id).into(),
                value: (*value).into(),
            })
            .collect(),
    }
}

fn marketplace(user_id: &str, trans: &str, rating_type_id: &str, value: &str) -> MarketplaceSubmissionRequest {
    MarketplaceSubmissionRequest {
        rating_type_id: rating_type_id.into(),
        source_type: "store".into(),
        source_uid: "S-1".into(),
        user_id: user_id.into(),
        original_trans_id: trans.into(),
        value: value.into(),
        comment: None,
        media: vec!["tmp/photo-1.jpg".into()],
    }
}

#[tokio::test]
async fn test_second_submission_for_same_user_is_rejected() {
    let (storage, engine) = setup().await;
    let star = star_type(&engine).await;
    let rating = rating_for(&engine, &star.id, "D-1").await;

    let first = engine
        .admit_submission(classic("U-1", "T-1", &[(&rating.id, "4")]))
        .await
        .unwrap();
    assert_eq!(first.submissions.len(), 1);
    assert_eq!(first.submissions[0].value, "4");

    let err = engine
        .admit_submission(classic("U-1", "T-2", &[(&rating.id, "5")]))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E201");
    assert!(err.is_user_facing());

    let rows = storage.list_active_submissions(&rating.id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].source_trans_id, format!("{}||T-1", rating.id));
}

#[tokio::test]
async fn test_legacy_user_id_also_blocks_duplicates() {
    let (_storage, engine) = setup().await;
    let star = star_type(&engine).await;
    let rating = rating_for(&engine, &star.id, "D-1").await;

    let mut req = classic("U-1", "T-1", &[(&rating.id, "4")]);
    req.user_id_legacy = Some(42);
    engine.admit_submission(req).await.unwrap();

    let mut again = classic("U-OTHER", "T-2", &[(&rating.id, "3")]);
    again.user_id_legacy = Some(42);
    let err = engine.admit_submission(again).await.unwrap_err();
    assert_eq!(err.code(), "E201");
}

#[tokio::test]
async fn test_failed_row_aborts_whole_batch() {
    let (storage, engine) = setup().await;
    let star = star_type(&engine).await;
    let likert = likert_type(&engine, &["Unsatisfied", "Satisfied"]).await;
    let numeric_rating = rating_for(&engine, &star.id, "D-1").await;
    let likert_rating = rating_for(&engine, &likert.id, "D-1").await;

    let err = engine
        .admit_submission(classic(
            "U-1",
            "T-1",
            &[(&numeric_rating.id, "4"), (&likert_rating.id, "9")],
        ))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E109");
    assert!(err.message().contains("[1, 2]"));

    assert!(storage.list_active_submissions(&numeric_rating.id).await.unwrap().is_empty());
    assert!(storage.list_active_submissions(&likert_rating.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_storage_batch_rolls_back_on_unique_violation() {
    let (storage, engine) = setup().await;
    let star = star_type(&engine).await;
    let first = rating_for(&engine, &star.id, "D-1").await;
    let second = rating_for(&engine, &star.id, "D-2").await;

    let row = |rating_id: &str, user: &str| NewSubmission {
        rating_id: rating_id.into(),
        rating_type_id: star.id.clone(),
        user_id: Some(user.into()),
        user_id_legacy: None,
        value: "3".into(),
        numeric_value: Some(3.0),
        comment: None,
        source_trans_id: format!("{rating_id}||T"),
        tagging: None,
        identity: IdentityKey::User {
            rating_id: rating_id.into(),
            user_id: Some(user.into()),
            user_id_legacy: None,
        },
    };

    storage.insert_submissions(vec![row(&second.id, "U-1")]).await.unwrap();

    let err = storage
        .insert_submissions(vec![row(&first.id, "U-1"), row(&second.id, "U-1")])
        .await
        .unwrap_err();
    assert!(matches!(err, RatingError::DuplicateKey(_)));

    assert!(storage.list_active_submissions(&first.id).await.unwrap().is_empty());
    assert_eq!(storage.list_active_submissions(&second.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_cancel_releases_identity_key() {
    let (storage, engine) = setup().await;
    let star = star_type(&engine).await;
    let rating = rating_for(&engine, &star.id, "D-1").await;

    let result = engine
        .admit_submission(classic("U-1", "T-1", &[(&rating.id, "2")]))
        .await
        .unwrap();
    let id = result.submissions[0].id.clone();

    engine
        .submissions
        .cancel_submission(&id, "user request")
        .await
        .unwrap();
    let err = engine
        .submissions
        .cancel_submission(&id, "again")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E206");

    engine
        .admit_submission(classic("U-1", "T-2", &[(&rating.id, "5")]))
        .await
        .unwrap();

    let rows = storage.list_active_submissions(&rating.id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].value, "5");

    let cancelled = storage.get_submission_by_id(&id).await.unwrap().unwrap();
    assert!(cancelled.cancelled);
    assert_eq!(cancelled.cancelled_reason.as_deref(), Some("user request"));
}

#[tokio::test]
async fn test_numeric_submission_tagged_with_likert_selection() {
    let (storage, engine) = setup().await;
    let star = star_type(&engine).await;
    let reasons = likert_type(&engine, &["Late", "Rude", "Expensive"]).await;
    let numeric_rating = rating_for(&engine, &star.id, "D-1").await;
    let likert_rating = rating_for(&engine, &reasons.id, "D-1").await;

    let result = engine
        .admit_submission(classic(
            "U-1",
            "T-1",
            &[(&numeric_rating.id, "2"), (&likert_rating.id, "3")],
        ))
        .await
        .unwrap();
    assert_eq!(result.submissions.len(), 2);

    let numeric_rows = storage.list_active_submissions(&numeric_rating.id).await.unwrap();
    assert_eq!(numeric_rows.len(), 1);
    assert_eq!(
        numeric_rows[0].tagging,
        Some(Tagging {
            rating_id: likert_rating.id.clone(),
            value: vec!["3".to_string()],
        })
    );

    let likert_rows = storage.list_active_submissions(&likert_rating.id).await.unwrap();
    assert_eq!(likert_rows.len(), 1);
    assert_eq!(likert_rows[0].tagging, None);

    // 两行共享同一事务后缀
    assert!(numeric_rows[0].source_trans_id.ends_with("||T-1"));
    assert!(likert_rows[0].source_trans_id.ends_with("||T-1"));
}

#[tokio::test]
async fn test_more_than_one_rating_of_a_kind_is_rejected() {
    let (storage, engine) = setup().await;
    let star = star_type(&engine).await;
    let a = rating_for(&engine, &star.id, "D-1").await;
    let b = rating_for(&engine, &star.id, "D-2").await;

    let err = engine
        .admit_submission(classic("U-1", "T-1", &[(&a.id, "2"), (&b.id, "3")]))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E110");
    assert!(storage.list_active_submissions(&a.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_rating_is_rejected() {
    let (_storage, engine) = setup().await;
    let err = engine
        .admit_submission(classic("U-1", "T-1", &[("missing", "2")]))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E203");
}

#[tokio::test]
async fn test_classic_numeric_summary() {
    let (_storage, engine) = setup().await;
    let star = star_type(&engine).await;
    let rating = rating_for(&engine, &star.id, "D-1").await;

    let err = engine.get_numeric_summary(&rating.id, "doctor").await.unwrap_err();
    assert_eq!(err.code(), "E301");
    assert_eq!(err.public_message(), "Formula Not Found: failed");

    engine
        .formulas
        .create_formula(CreateFormulaRequest {
            source_type: "doctor".into(),
            rating_type_id: star.id.clone(),
            formula: "total_rating_point / total_user_count".into(),
        })
        .await
        .unwrap();

    let empty = engine.get_numeric_summary(&rating.id, "doctor").await.unwrap();
    assert_eq!((empty.value, empty.total_reviewer), (0, 0));

    for (user, value) in [("U-1", "4"), ("U-2", "5")] {
        engine
            .admit_submission(classic(user, "T", &[(&rating.id, value)]))
            .await
            .unwrap();
    }

    // 4.5 按 floor(x + 0.5) 取整
    let summary = engine.get_numeric_summary(&rating.id, "doctor").await.unwrap();
    assert_eq!(summary.value, 5);
    assert_eq!(summary.total_reviewer, 2);
}

#[tokio::test]
async fn test_decimal_spelling_of_integer_score_is_counted() {
    let (storage, engine) = setup().await;
    let star = star_type(&engine).await;
    let rating = rating_for(&engine, &star.id, "D-1").await;
    engine
        .formulas
        .create_formula(CreateFormulaRequest {
            source_type: "doctor".into(),
            rating_type_id: star.id.clone(),
            formula: "total_rating_point / total_user_count".into(),
        })
        .await
        .unwrap();

    let admitted = engine
        .admit_submission(classic("U-1", "T-1", &[(&rating.id, "4.0")]))
        .await
        .unwrap();
    assert_eq!(admitted.submissions[0].value, "4");
    engine
        .admit_submission(classic("U-2", "T-2", &[(&rating.id, "2")]))
        .await
        .unwrap();

    let rows = storage.list_active_submissions(&rating.id).await.unwrap();
    assert!(rows.iter().all(|row| row.value == "4" || row.value == "2"));

    let summary = engine.get_numeric_summary(&rating.id, "doctor").await.unwrap();
    assert_eq!(summary.value, 3);
    assert_eq!(summary.total_reviewer, 2);
}

#[tokio::test]
async fn test_replacing_formula_keeps_one_active() {
    let (_storage, engine) = setup().await;
    let star = star_type(&engine).await;
    let rating = rating_for(&engine, &star.id, "D-1").await;
    engine
        .admit_submission(classic("U-1", "T", &[(&rating.id, "3")]))
        .await
        .unwrap();

    for formula in ["total_rating_point", "total_rating_point * 2"] {
        engine
            .formulas
            .create_formula(CreateFormulaRequest {
                source_type: "doctor".into(),
                rating_type_id: star.id.clone(),
                formula: formula.into(),
            })
            .await
            .unwrap();
    }

    let summary = engine.get_numeric_summary(&rating.id, "doctor").await.unwrap();
    assert_eq!(summary.value, 6);

    let err = engine
        .formulas
        .create_formula(CreateFormulaRequest {
            source_type: "doctor".into(),
            rating_type_id: star.id.clone(),
            formula: "total_rating_point / )".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E302");
}

#[tokio::test]
async fn test_marketplace_flow() {
    let (_storage, engine) = setup().await;
    let star = star_type(&engine).await;
    engine
        .formulas
        .create_formula(CreateFormulaRequest {
            source_type: "store".into(),
            rating_type_id: star.id.clone(),
            formula: "(sum / count) / 1".into(),
        })
        .await
        .unwrap();

    let first = engine
        .admit_marketplace_submission(marketplace("U-1", "T-1", &star.id, "5"))
        .await
        .unwrap();
    assert_eq!(first.source_trans_id, "T-1||store||S-1||U-1");

    let second = engine
        .admit_marketplace_submission(marketplace("U-2", "T-2", &star.id, "5"))
        .await
        .unwrap();
    // 评分按 类型 + 来源 复用
    assert_eq!(
        first.submissions[0].rating_id,
        second.submissions[0].rating_id
    );

    let err = engine
        .admit_marketplace_submission(marketplace("U-1", "T-1", &star.id, "3"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E201");

    let summary = engine
        .summary
        .get_marketplace_summary(&first.submissions[0].rating_id)
        .await
        .unwrap();
    assert_eq!(summary.value, "5.0");
    assert_eq!(summary.total_reviewer, 2);
}

#[tokio::test]
async fn test_marketplace_rejects_unknown_type_and_bad_value() {
    let (_storage, engine) = setup().await;
    let star = star_type(&engine).await;

    let err = engine
        .admit_marketplace_submission(marketplace("U-1", "T-1", "nope", "5"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E202");

    let err = engine
        .admit_marketplace_submission(marketplace("U-1", "T-1", &star.id, "4.5"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E108");
    assert!(err.public_message().contains("[1, 2, 3, 4, 5]"));
}

#[tokio::test]
async fn test_likert_summary_counts_each_statement() {
    let (_storage, engine) = setup().await;
    let likert = likert_type(&engine, &["Unsatisfied", "Satisfied"]).await;
    let rating = rating_for(&engine, &likert.id, "D-1").await;

    for (user, value) in [("U-1", "1"), ("U-2", "1"), ("U-3", "1"), ("U-4", "2"), ("U-5", "2")] {
        engine
            .admit_submission(classic(user, "T", &[(&rating.id, value)]))
            .await
            .unwrap();
    }

    let summary = engine.get_likert_summary(&rating.id).await.unwrap();
    assert_eq!(
        summary,
        vec![
            LikertStatementSummary {
                seq_id: 1,
                value: "Unsatisfied".into(),
                total_reviewer: 3,
            },
            LikertStatementSummary {
                seq_id: 2,
                value: "Satisfied".into(),
                total_reviewer: 2,
            },
        ]
    );

    let dispatched = engine.summary.get_summary(&rating.id, "doctor").await.unwrap();
    assert_eq!(dispatched, RatingSummary::Likert(summary));
}

#[tokio::test]
async fn test_summary_by_likert_tag() {
    let (_storage, engine) = setup().await;
    let star = star_type(&engine).await;
    let reasons = likert_type(&engine, &["Late", "Rude", "Expensive"]).await;
    let numeric_rating = rating_for(&engine, &star.id, "D-1").await;
    let likert_rating = rating_for(&engine, &reasons.id, "D-1").await;
    engine
        .formulas
        .create_formula(CreateFormulaRequest {
            source_type: "doctor".into(),
            rating_type_id: star.id.clone(),
            formula: "total_rating_point / total_user_count".into(),
        })
        .await
        .unwrap();

    for (user, score, reason) in [("U-1", "1", "3"), ("U-2", "2", "3"), ("U-3", "5", "1")] {
        engine
            .admit_submission(classic(
                user,
                "T",
                &[(&numeric_rating.id, score), (&likert_rating.id, reason)],
            ))
            .await
            .unwrap();
    }

    let tagged = engine
        .summary
        .get_numeric_summary_by_tag(&numeric_rating.id, "doctor", &likert_rating.id, "3")
        .await
        .unwrap();
    assert_eq!(tagged.total_reviewer, 2);
    assert_eq!(tagged.value, 2); // 1.5 -> 2

    let all = engine.summary.get_summary(&numeric_rating.id, "doctor").await.unwrap();
    match all {
        RatingSummary::Numeric(summary) => {
            assert_eq!(summary.total_reviewer, 3);
            assert_eq!(summary.value, 3); // 8 / 3 = 2.67 -> 3
        }
        other => panic!("unexpected summary: {other:?}"),
    }
}

#[tokio::test]
async fn test_frozen_fields_with_dependent_rating() {
    let (_storage, engine) = setup().await;
    let star = star_type(&engine).await;

    // 没有依赖时可以修改
    let updated = engine
        .rating_types
        .update_numeric_rating_type(
            &star.id,
            UpdateNumericRatingTypeRequest {
                description: Some("stars".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.description.as_deref(), Some("stars"));

    let rating = rating_for(&engine, &star.id, "D-1").await;
    let err = engine
        .rating_types
        .update_numeric_rating_type(
            &star.id,
            UpdateNumericRatingTypeRequest {
                scale: Some(1),
                intervals: Some(9),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, RatingError::field_frozen("scale"));

    // 有评分但没有提交时 type_code 仍可修改
    engine
        .rating_types
        .update_numeric_rating_type(
            &star.id,
            UpdateNumericRatingTypeRequest {
                type_code: Some("STAR_V2".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    engine
        .admit_submission(classic("U-1", "T", &[(&rating.id, "3")]))
        .await
        .unwrap();
    let err = engine
        .rating_types
        .update_numeric_rating_type(
            &star.id,
            UpdateNumericRatingTypeRequest {
                type_code: Some("STAR_V3".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, RatingError::field_frozen("type_code"));
}

#[tokio::test]
async fn test_catalog_definition_rules() {
    let (_storage, engine) = setup().await;

    let err = engine
        .rating_types
        .create_numeric_rating_type(CreateNumericRatingTypeRequest {
            type_code: "BAD".into(),
            description: None,
            min_score: 1,
            max_score: 5,
            scale: 1,
            intervals: 5,
            status: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E104");

    let err = engine
        .rating_types
        .create_likert_rating_type(CreateLikertRatingTypeRequest {
            type_code: "BAD".into(),
            description: None,
            num_statements: 3,
            statements: statement_slots(&["a", "b"]),
            status: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E105");

    let likert = likert_type(&engine, &["a", "b"]).await;
    rating_for(&engine, &likert.id, "D-1").await;
    let err = engine
        .rating_types
        .update_likert_rating_type(
            &likert.id,
            UpdateLikertRatingTypeRequest {
                num_statements: Some(3),
                statements: Some(statement_slots(&["a", "b", "c"])),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, RatingError::field_frozen("num_statements"));

    let err = engine
        .rating_types
        .update_numeric_rating_type("missing", UpdateNumericRatingTypeRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E202");
}

#[tokio::test]
async fn test_rating_uniqueness() {
    let (_storage, engine) = setup().await;
    let star = star_type(&engine).await;
    rating_for(&engine, &star.id, "D-1").await;

    let err = engine
        .ratings
        .create_rating(CreateRatingRequest {
            source_type: "doctor".into(),
            source_uid: "D-1".into(),
            rating_type_id: star.id.clone(),
            comment_allowed: Some(false),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E204");

    let err = engine
        .ratings
        .create_rating(CreateRatingRequest {
            source_type: "doctor".into(),
            source_uid: "D-9".into(),
            rating_type_id: "missing".into(),
            comment_allowed: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E202");
}

#[tokio::test]
async fn test_update_submission_revalidates_value() {
    let (_storage, engine) = setup().await;
    let star = star_type(&engine).await;
    let rating = rating_for(&engine, &star.id, "D-1").await;
    let result = engine
        .admit_submission(classic("U-1", "T", &[(&rating.id, "3")]))
        .await
        .unwrap();
    let id = result.submissions[0].id.clone();

    let err = engine
        .submissions
        .update_submission_value(
            &id,
            UpdateSubmissionRequest {
                value: Some("7".into()),
                comment: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E108");

    let updated = engine
        .submissions
        .update_submission_value(
            &id,
            UpdateSubmissionRequest {
                value: Some("4".into()),
                comment: Some("better on second visit".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.value, "4");
    assert_eq!(updated.comment.as_deref(), Some("better on second visit"));
    assert_eq!(updated.user_id.as_deref(), Some("U-1"));

    let err = engine
        .submissions
        .update_submission_value("missing", UpdateSubmissionRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E205");
}

#[tokio::test]
async fn test_store_guard_timeout_and_retries() {
    let (storage, _engine) = setup().await;
    let guard = StoreGuard::new(
        storage,
        &EngineConfig {
            store_timeout_ms: 20,
            read_retries: 2,
        },
    );

    let err = guard
        .write("slow_write", async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(())
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E405");

    // 存储故障重试两次后成功
    let counter = AtomicU32::new(0);
    let attempts = &counter;
    let value = guard
        .read("flaky_read", move || async move {
            if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(RatingError::database_operation("connection reset"))
            } else {
                Ok(7)
            }
        })
        .await
        .unwrap();
    assert_eq!(value, 7);
    assert_eq!(attempts.load(Ordering::SeqCst), 3);

    // 非存储错误不重试
    let counter = AtomicU32::new(0);
    let attempts = &counter;
    let err = guard
        .read("not_found", move || async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(RatingError::rating_not_found("R"))
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E203");
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}
