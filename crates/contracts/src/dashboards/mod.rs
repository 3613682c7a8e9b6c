pub mod d401_risk_fund;
