//! 评分公式管理

use tracing::{debug, info};

use crate::errors::Result;
use crate::models::formulas::{entities::RatingFormula, requests::CreateFormulaRequest};
use crate::services::formula;
use crate::services::guard::StoreGuard;
use crate::services::rating_types::RatingTypeService;
use crate::storage::FormulaStore;

#[derive(Clone)]
pub struct FormulaService {
    store: StoreGuard,
    catalog: RatingTypeService,
}

impl FormulaService {
    pub fn new(store: StoreGuard, catalog: RatingTypeService) -> Self {
        Self { store, catalog }
    }

    /// 创建公式并替换同一 (评分类型, 来源类型) 下的现行公式
    pub async fn create_formula(&self, req: CreateFormulaRequest) -> Result<RatingFormula> {
        if let Err(e) = formula::validate(&req.formula) {
            debug!("公式校验失败: {}", e);
            return Err(e);
        }
        self.catalog.resolve_kind(&req.rating_type_id).await?;

        let store = &self.store;
        let created = store
            .write("create_formula", store.storage().create_formula(req))
            .await?;

        info!(
            "评分类型 {} / {} 的现行公式更新为 {}",
            created.rating_type_id, created.source_type, created.formula
        );
        Ok(created)
    }
}
