use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};

crate::aggregate_id!(
    /// ID страхового полиса
    InsurancePolicyId
);

/// Страховой полис на груз. Ограничивает выплату по возврату сверху.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsurancePolicy {
    #[serde(flatten)]
    pub base: BaseAggregate<InsurancePolicyId>,

    /// Максимальная выплата по одному возврату
    pub max_payout: i64,

    /// Страховая премия, поступившая в фонд
    pub premium: i64,
}

impl InsurancePolicy {
    pub fn new_for_insert(code: String, description: String, max_payout: i64, premium: i64) -> Self {
        Self {
            base: BaseAggregate::new(InsurancePolicyId::new_v4(), code, description),
            max_payout,
            premium,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.code.trim().is_empty() {
            return Err("Policy code must not be empty".into());
        }
        if self.max_payout <= 0 {
            return Err("Max payout must be positive".into());
        }
        if self.premium < 0 {
            return Err("Premium must not be negative".into());
        }
        Ok(())
    }

    /// Покрывает ли полис выплату указанной суммы
    pub fn covers(&self, amount: i64) -> bool {
        amount <= self.max_payout
    }
}

impl AggregateRoot for InsurancePolicy {
    type Id = InsurancePolicyId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "insurance_policy"
    }

    fn element_name() -> &'static str {
        "Insurance policy"
    }
}
