pub mod a001_cargo_order;
pub mod a003_return_case;
pub mod d401_risk_fund;
pub mod p901_risk_fund_ledger;
