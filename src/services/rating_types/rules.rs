//! 评分类型定义规则
//!
//! 纯函数，不访问存储；依赖探测的结果由调用方传入。

use crate::errors::{RatingError, Result};
use crate::models::rating_types::entities::{
    LIKERT_MAX_STATEMENTS, LikertRatingType, MAX_INTERVALS, MAX_SCALE, NumericRatingType,
    StatementSlots,
};
use crate::models::rating_types::requests::{
    UpdateLikertRatingTypeRequest, UpdateNumericRatingTypeRequest,
};

/// 计算合法取值个数：(max - min) * (scale + 1) + 1
pub fn compute_required_intervals(min: i64, max: i64, scale: i32) -> Result<i64> {
    if !(0..=MAX_SCALE).contains(&scale) {
        return Err(RatingError::invalid_scale(format!(
            "scale must be 0, 1 or 2, got {scale}"
        )));
    }
    max.checked_sub(min)
        .and_then(|range| range.checked_mul(i64::from(scale) + 1))
        .and_then(|steps| steps.checked_add(1))
        .ok_or_else(|| {
            RatingError::interval_mismatch(format!(
                "score range {min}..{max} at scale {scale} is too wide"
            ))
        })
}

/// 校验数值评分类型定义
pub fn validate_numeric_definition(
    min_score: i64,
    max_score: i64,
    scale: i32,
    intervals: i64,
) -> Result<()> {
    if !(0..=MAX_SCALE).contains(&scale) {
        return Err(RatingError::scale_out_of_range(format!(
            "scale must be between 0 and {MAX_SCALE}, got {scale}"
        )));
    }
    if min_score >= max_score {
        return Err(RatingError::min_not_less_than_max(format!(
            "min_score ({min_score}) must be less than max_score ({max_score})"
        )));
    }
    let required = compute_required_intervals(min_score, max_score, scale)?;
    if required > MAX_INTERVALS {
        return Err(RatingError::interval_mismatch(format!(
            "min_score {min_score}, max_score {max_score}, scale {scale} yields {required} values, at most {MAX_INTERVALS} are allowed"
        )));
    }
    if intervals != required {
        return Err(RatingError::interval_mismatch(format!(
            "intervals must be {required} for min_score {min_score}, max_score {max_score}, scale {scale}, got {intervals}"
        )));
    }
    Ok(())
}

pub fn validate_numeric(rating_type: &NumericRatingType) -> Result<()> {
    validate_numeric_definition(
        rating_type.min_score,
        rating_type.max_score,
        rating_type.scale,
        rating_type.intervals,
    )
}

fn frozen_if_changed<T: PartialEq>(
    field: &'static str,
    current: &T,
    patch: Option<&T>,
) -> Result<()> {
    match patch {
        Some(next) if next != current => Err(RatingError::field_frozen(field)),
        _ => Ok(()),
    }
}

/// 存在依赖评分时 status/min_score/max_score/scale/intervals 只读，
/// 已有提交时 type_code 也只读
pub fn validate_numeric_update(
    current: &NumericRatingType,
    patch: &UpdateNumericRatingTypeRequest,
    has_dependent_rating: bool,
    has_dependent_submission: bool,
) -> Result<()> {
    if has_dependent_rating {
        frozen_if_changed("status", &current.status, patch.status.as_ref())?;
        frozen_if_changed("min_score", &current.min_score, patch.min_score.as_ref())?;
        frozen_if_changed("max_score", &current.max_score, patch.max_score.as_ref())?;
        frozen_if_changed("scale", &current.scale, patch.scale.as_ref())?;
        frozen_if_changed("intervals", &current.intervals, patch.intervals.as_ref())?;
        if has_dependent_submission {
            frozen_if_changed("type_code", &current.type_code, patch.type_code.as_ref())?;
        }
    }
    Ok(())
}

/// 将更新合并到当前定义上，得到更新后的完整定义
pub fn apply_numeric_patch(
    current: &NumericRatingType,
    patch: &UpdateNumericRatingTypeRequest,
) -> NumericRatingType {
    let mut merged = current.clone();
    if let Some(type_code) = &patch.type_code {
        merged.type_code = type_code.clone();
    }
    if let Some(description) = &patch.description {
        merged.description = Some(description.clone());
    }
    if let Some(min_score) = patch.min_score {
        merged.min_score = min_score;
    }
    if let Some(max_score) = patch.max_score {
        merged.max_score = max_score;
    }
    if let Some(scale) = patch.scale {
        merged.scale = scale;
    }
    if let Some(intervals) = patch.intervals {
        merged.intervals = intervals;
    }
    if let Some(status) = patch.status {
        merged.status = status;
    }
    merged
}

fn is_filled(slot: &Option<String>) -> bool {
    slot.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// 校验 Likert 陈述数量：从 statement_01 起连续非空的陈述数必须恰好等于 num_statements，
/// 之后不得再有非空陈述
pub fn validate_likert_statements(num_statements: i32, statements: &StatementSlots) -> Result<()> {
    if !(1..=LIKERT_MAX_STATEMENTS as i32).contains(&num_statements) {
        return Err(RatingError::num_statements_mismatch(format!(
            "num_statements must be between 1 and {LIKERT_MAX_STATEMENTS}, got {num_statements}"
        )));
    }

    let contiguous = statements.iter().take_while(|s| is_filled(s)).count();
    let filled = statements.iter().filter(|s| is_filled(s)).count();
    if contiguous != num_statements as usize || filled != contiguous {
        return Err(RatingError::num_statements_mismatch(format!(
            "num_statements is {num_statements}, but {filled} statement(s) are filled ({contiguous} contiguous from statement_01)"
        )));
    }
    Ok(())
}

pub fn validate_likert_statement_count(rating_type: &LikertRatingType) -> Result<()> {
    validate_likert_statements(rating_type.num_statements, &rating_type.statements)
}

/// Likert 类型的冻结策略与数值类型一致：
/// 存在依赖评分时 status/num_statements/陈述文本只读，已有提交时 type_code 也只读
pub fn validate_likert_update(
    current: &LikertRatingType,
    patch: &UpdateLikertRatingTypeRequest,
    has_dependent_rating: bool,
    has_dependent_submission: bool,
) -> Result<()> {
    if has_dependent_rating {
        frozen_if_changed("status", &current.status, patch.status.as_ref())?;
        frozen_if_changed(
            "num_statements",
            &current.num_statements,
            patch.num_statements.as_ref(),
        )?;
        if let Some(statements) = &patch.statements {
            for (idx, (now, next)) in current.statements.iter().zip(statements).enumerate() {
                if now != next {
                    return Err(RatingError::field_frozen(format!("statement_{:02}", idx + 1)));
                }
            }
        }
        if has_dependent_submission {
            frozen_if_changed("type_code", &current.type_code, patch.type_code.as_ref())?;
        }
    }
    Ok(())
}

pub fn apply_likert_patch(
    current: &LikertRatingType,
    patch: &UpdateLikertRatingTypeRequest,
) -> LikertRatingType {
    let mut merged = current.clone();
    if let Some(type_code) = &patch.type_code {
        merged.type_code = type_code.clone();
    }
    if let Some(description) = &patch.description {
        merged.description = Some(description.clone());
    }
    if let Some(num_statements) = patch.num_statements {
        merged.num_statements = num_statements;
    }
    if let Some(statements) = &patch.statements {
        merged.statements = statements.clone();
    }
    if let Some(status) = patch.status {
        merged.status = status;
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;
    use crate::models::rating_types::entities::statement_slots;

    fn numeric() -> NumericRatingType {
        NumericRatingType {
            id: "N1".into(),
            type_code: "STAR".into(),
            description: None,
            min_score: 1,
            max_score: 5,
            scale: 0,
            intervals: 5,
            status: Status::Active,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn likert() -> LikertRatingType {
        LikertRatingType {
            id: "L1".into(),
            type_code: "REASON".into(),
            description: None,
            num_statements: 2,
            statements: statement_slots(&["Unsatisfied", "Satisfied"]),
            status: Status::Active,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_compute_required_intervals() {
        assert_eq!(compute_required_intervals(1, 5, 0).unwrap(), 5);
        assert_eq!(compute_required_intervals(1, 5, 1).unwrap(), 9);
        assert_eq!(compute_required_intervals(0, 10, 2).unwrap(), 31);
        assert_eq!(compute_required_intervals(1, 5, 3).unwrap_err().code(), "E101");
        assert_eq!(compute_required_intervals(1, 5, -1).unwrap_err().code(), "E101");
        assert_eq!(
            compute_required_intervals(i64::MIN / 2 - 10, i64::MAX / 2 + 10, 0)
                .unwrap_err()
                .code(),
            "E104"
        );
        assert_eq!(
            compute_required_intervals(i64::MIN, i64::MAX, 2).unwrap_err().code(),
            "E104"
        );
    }

    #[test]
    fn test_numeric_definition() {
        assert!(validate_numeric_definition(1, 5, 1, 9).is_ok());
        assert_eq!(validate_numeric_definition(1, 5, 3, 9).unwrap_err().code(), "E102");
        assert_eq!(validate_numeric_definition(5, 5, 0, 1).unwrap_err().code(), "E103");
        assert_eq!(validate_numeric_definition(6, 5, 0, 1).unwrap_err().code(), "E103");
        let err = validate_numeric_definition(1, 5, 1, 5).unwrap_err();
        assert_eq!(err.code(), "E104");
        assert!(err.message().contains("must be 9"));

        // 0..100_000_000 精度 2 会产生 3 亿个取值
        let err = validate_numeric_definition(0, 100_000_000, 2, 300_000_001).unwrap_err();
        assert_eq!(err.code(), "E104");
        assert!(validate_numeric_definition(0, 100_000, 0, 100_001).is_ok());
    }

    #[test]
    fn test_scale_frozen_with_dependent_rating() {
        let patch = UpdateNumericRatingTypeRequest {
            scale: Some(1),
            intervals: Some(9),
            ..Default::default()
        };
        let err = validate_numeric_update(&numeric(), &patch, true, false).unwrap_err();
        assert_eq!(err, RatingError::field_frozen("scale"));

        assert!(validate_numeric_update(&numeric(), &patch, false, false).is_ok());
    }

    #[test]
    fn test_unchanged_value_is_not_a_change() {
        let patch = UpdateNumericRatingTypeRequest {
            scale: Some(0),
            description: Some("stars".into()),
            ..Default::default()
        };
        assert!(validate_numeric_update(&numeric(), &patch, true, true).is_ok());
    }

    #[test]
    fn test_type_code_frozen_only_with_submission() {
        let patch = UpdateNumericRatingTypeRequest {
            type_code: Some("STAR_V2".into()),
            ..Default::default()
        };
        assert!(validate_numeric_update(&numeric(), &patch, true, false).is_ok());
        assert_eq!(
            validate_numeric_update(&numeric(), &patch, true, true).unwrap_err(),
            RatingError::field_frozen("type_code")
        );
    }

    #[test]
    fn test_frozen_check_order() {
        let patch = UpdateNumericRatingTypeRequest {
            status: Some(Status::Inactive),
            scale: Some(1),
            ..Default::default()
        };
        assert_eq!(
            validate_numeric_update(&numeric(), &patch, true, true).unwrap_err(),
            RatingError::field_frozen("status")
        );
    }

    #[test]
    fn test_likert_statement_count() {
        assert!(validate_likert_statements(2, &statement_slots(&["a", "b"])).is_ok());
        // 少于声明数量
        assert_eq!(
            validate_likert_statements(3, &statement_slots(&["a", "b"])).unwrap_err().code(),
            "E105"
        );
        // 多于声明数量
        assert_eq!(
            validate_likert_statements(1, &statement_slots(&["a", "b"])).unwrap_err().code(),
            "E105"
        );
        // 不连续
        let mut gap = statement_slots(&["a"]);
        gap[2] = Some("c".into());
        assert_eq!(validate_likert_statements(1, &gap).unwrap_err().code(), "E105");
        // 空白视为未填写
        assert_eq!(
            validate_likert_statements(2, &statement_slots(&["a", "  "])).unwrap_err().code(),
            "E105"
        );
        assert_eq!(
            validate_likert_statements(11, &statement_slots(&["a"])).unwrap_err().code(),
            "E105"
        );
        assert!(validate_likert_statement_count(&likert()).is_ok());
    }

    #[test]
    fn test_likert_statement_text_frozen() {
        let patch = UpdateLikertRatingTypeRequest {
            statements: Some(statement_slots(&["Unsatisfied", "Happy"])),
            ..Default::default()
        };
        assert_eq!(
            validate_likert_update(&likert(), &patch, true, false).unwrap_err(),
            RatingError::field_frozen("statement_02")
        );
        assert!(validate_likert_update(&likert(), &patch, false, false).is_ok());
    }

    #[test]
    fn test_apply_numeric_patch() {
        let patch = UpdateNumericRatingTypeRequest {
            max_score: Some(10),
            intervals: Some(10),
            ..Default::default()
        };
        let merged = apply_numeric_patch(&numeric(), &patch);
        assert_eq!(merged.max_score, 10);
        assert_eq!(merged.min_score, 1);
        assert!(validate_numeric(&merged).is_ok());
    }
}
