//! 提交取值校验
//!
//! 数值类型的合法取值是一个按精度取整后的离散集合，成员判断是精确匹配，
//! 而不是区间判断。

use crate::errors::{RatingError, Result};
use crate::models::rating_types::entities::{LikertRatingType, NumericRatingType};

/// 按 `scale` 位小数四舍五入（远离零）
pub fn round_to_scale(value: f64, scale: i32) -> f64 {
    let factor = 10f64.powi(scale);
    (value * factor).round() / factor
}

/// 错误信息中完整列出的合法取值个数上限
const MAX_LISTED_VALUES: i64 = 50;

// 等差数列的第 i 项，按精度取整
fn nth_valid_value(min: f64, max: f64, last: f64, i: i64, scale: i32) -> f64 {
    round_to_scale(min + (max - min) * i as f64 / last, scale)
}

/// 生成数值类型的合法取值：从 min 到 max 的等差数列，共 `intervals` 项
pub fn valid_numeric_values(min: i64, max: i64, scale: i32, intervals: i64) -> Vec<f64> {
    if intervals <= 0 {
        return Vec::new();
    }
    if intervals == 1 {
        return vec![round_to_scale(min as f64, scale)];
    }

    let (min, max) = (min as f64, max as f64);
    let last = (intervals - 1) as f64;
    (0..intervals)
        .map(|i| nth_valid_value(min, max, last, i, scale))
        .collect()
}

/// 判断取值是否落在合法集合上，不展开整个集合
///
/// 先按步长反推最近的序号，再与该序号附近的几项做精确比较。
pub fn is_valid_numeric_value(min: i64, max: i64, scale: i32, intervals: i64, value: f64) -> bool {
    if intervals <= 0 || !value.is_finite() {
        return false;
    }
    if intervals == 1 {
        return round_to_scale(min as f64, scale) == value;
    }

    let (lo, hi) = (min as f64, max as f64);
    let last = (intervals - 1) as f64;
    let k = ((value - lo) / (hi - lo) * last).round() as i64;
    (k.saturating_sub(1)..=k.saturating_add(1))
        .filter(|i| (0..intervals).contains(i))
        .any(|i| nth_valid_value(lo, hi, last, i, scale) == value)
}

/// 数值取值的规范文本：整数值不带小数部分，其余按精度输出
pub fn canonical_numeric_text(value: f64, scale: i32) -> String {
    // 消除 -0
    let value = value + 0.0;
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let precision = scale.max(0) as usize;
        format!("{value:.precision$}")
    }
}

// 集合较大时只列出开头几项与最后一项
fn describe_valid_values(min: i64, max: i64, scale: i32, intervals: i64) -> String {
    let precision = scale.max(0) as usize;
    let show = |v: f64| format!("{v:.precision$}");

    if intervals <= MAX_LISTED_VALUES {
        let items: Vec<String> = valid_numeric_values(min, max, scale, intervals)
            .into_iter()
            .map(show)
            .collect();
        return format!("[{}]", items.join(", "));
    }

    let (lo, hi) = (min as f64, max as f64);
    let last = (intervals - 1) as f64;
    let head: Vec<String> = (0..3)
        .map(|i| show(nth_valid_value(lo, hi, last, i, scale)))
        .collect();
    format!(
        "[{}, ..., {}] ({intervals} values)",
        head.join(", "),
        show(nth_valid_value(lo, hi, last, intervals - 1, scale))
    )
}

/// 校验数值提交，返回解析后的值
pub fn validate_numeric_submission(rating_type: &NumericRatingType, raw: &str) -> Result<f64> {
    let value: f64 = raw.trim().parse().map_err(|_| {
        RatingError::not_parsable(format!("'{raw}' is not a number"))
    })?;
    if !value.is_finite() {
        return Err(RatingError::not_parsable(format!("'{raw}' is not a number")));
    }

    // 合法集合中的元素都已按精度取整，这里对候选值做同样的取整后精确比较，
    // 只有本身就在集合上的值才能通过
    let rounded = round_to_scale(value, rating_type.scale);
    if rounded == value
        && is_valid_numeric_value(
            rating_type.min_score,
            rating_type.max_score,
            rating_type.scale,
            rating_type.intervals,
            value,
        )
    {
        Ok(value)
    } else {
        Err(RatingError::out_of_set(format!(
            "'{raw}' is not allowed for rating type '{}', valid values: {}",
            rating_type.type_code,
            describe_valid_values(
                rating_type.min_score,
                rating_type.max_score,
                rating_type.scale,
                rating_type.intervals,
            )
        )))
    }
}

/// 校验 Likert 提交，返回解析后的选项（允许重复）
pub fn validate_likert_submission(rating_type: &LikertRatingType, raw: &str) -> Result<Vec<i32>> {
    if raw.trim().is_empty() {
        return Err(RatingError::not_parsable("empty Likert selection"));
    }

    let valid: Vec<String> = (1..=rating_type.num_statements)
        .map(|i| i.to_string())
        .collect();

    raw.split(',')
        .map(|token| {
            let token = token.trim();
            let seq: i32 = token.parse().map_err(|_| {
                RatingError::not_parsable(format!("'{token}' is not an integer selection"))
            })?;
            if (1..=rating_type.num_statements).contains(&seq) {
                Ok(seq)
            } else {
                Err(RatingError::out_of_range(format!(
                    "selection {seq} is not allowed for rating type '{}', valid values: [{}]",
                    rating_type.type_code,
                    valid.join(", ")
                )))
            }
        })
        .collect()
}
