//! 预导入模块，方便使用

pub use super::likert_rating_types::{
    ActiveModel as LikertRatingTypeActiveModel, Entity as LikertRatingTypes,
    Model as LikertRatingTypeModel,
};
pub use super::numeric_rating_types::{
    ActiveModel as NumericRatingTypeActiveModel, Entity as NumericRatingTypes,
    Model as NumericRatingTypeModel,
};
pub use super::rating_formulas::{
    ActiveModel as RatingFormulaActiveModel, Entity as RatingFormulas,
    Model as RatingFormulaModel,
};
pub use super::rating_submissions::{
    ActiveModel as RatingSubmissionActiveModel, Entity as RatingSubmissions,
    Model as RatingSubmissionModel,
};
pub use super::ratings::{ActiveModel as RatingActiveModel, Entity as Ratings, Model as RatingModel};
