//! 汇总公式计算
//!
//! 公式由管理端配置，按算术表达式求值。求值上下文不可变且禁用内置函数，
//! 只开放少量数学函数，不允许赋值或调用其它函数。

use evalexpr::{
    Context, ContextWithMutableFunctions, ContextWithMutableVariables, EvalexprError, Function,
    HashMapContext, Node, Value,
};

use crate::errors::{RatingError, Result};

/// 经典模式参数：总分
pub const PARAM_TOTAL_RATING_POINT: &str = "total_rating_point";
/// 经典模式参数：评分人数
pub const PARAM_TOTAL_USER_COUNT: &str = "total_user_count";
/// 市场模式参数：分数合计
pub const PARAM_SUM: &str = "sum";
/// 市场模式参数：提交数量
pub const PARAM_COUNT: &str = "count";

fn parse(formula: &str) -> Result<Node> {
    if formula.trim().is_empty() {
        return Err(RatingError::missing_formula("formula is empty"));
    }
    evalexpr::build_operator_tree(formula)
        .map_err(|e| RatingError::formula_parse(format!("'{formula}': {e}")))
}

fn unary(f: fn(f64) -> f64) -> Function {
    Function::new(move |argument| Ok(Value::Float(f(argument.as_number()?))))
}

fn fold(f: fn(f64, f64) -> f64) -> Function {
    Function::new(move |argument| {
        let numbers = match argument {
            Value::Tuple(items) => items
                .iter()
                .map(Value::as_number)
                .collect::<std::result::Result<Vec<_>, _>>()?,
            other => vec![other.as_number()?],
        };
        numbers
            .into_iter()
            .reduce(f)
            .map(Value::Float)
            .ok_or_else(|| EvalexprError::CustomMessage("expected at least one argument".into()))
    })
}

fn build_context(params: &[(&str, f64)]) -> std::result::Result<HashMapContext, EvalexprError> {
    let mut context = HashMapContext::new();
    context.set_builtin_functions_disabled(true)?;

    context.set_function("abs".into(), unary(f64::abs))?;
    context.set_function("floor".into(), unary(f64::floor))?;
    context.set_function("ceil".into(), unary(f64::ceil))?;
    context.set_function("round".into(), unary(f64::round))?;
    context.set_function("min".into(), fold(f64::min))?;
    context.set_function("max".into(), fold(f64::max))?;

    for (name, value) in params {
        context.set_value((*name).to_string(), Value::Float(*value))?;
    }

    Ok(context)
}

/// 校验公式能否解析（创建公式时使用）
pub fn validate(formula: &str) -> Result<()> {
    parse(formula).map(|_| ())
}

/// 对公式求值
///
/// 空公式返回 `MissingFormula`，语法错误返回 `FormulaParse`，
/// 未绑定变量、类型错误、非有限结果返回 `FormulaEval`。
pub fn evaluate(formula: &str, params: &[(&str, f64)]) -> Result<f64> {
    let tree = parse(formula)?;
    let context = build_context(params)
        .map_err(|e| RatingError::formula_eval(format!("context setup failed: {e}")))?;

    let value = tree
        .eval_with_context(&context)
        .map_err(|e| RatingError::formula_eval(format!("'{formula}': {e}")))?;
    let number = value.as_number().map_err(|_| {
        RatingError::formula_eval(format!("'{formula}' did not evaluate to a number: {value}"))
    })?;

    if number.is_finite() {
        Ok(number)
    } else {
        Err(RatingError::formula_eval(format!(
            "'{formula}' evaluated to a non-finite value"
        )))
    }
}

/// 经典模式取整：floor(x + 0.5)
pub fn round_classic(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// 市场模式：保留一位小数并格式化为定点字符串
pub fn format_marketplace(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}
