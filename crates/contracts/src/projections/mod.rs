pub mod p901_risk_fund_ledger;
