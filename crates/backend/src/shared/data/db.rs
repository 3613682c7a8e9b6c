use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};
use std::path::Path;

/// Подключение к SQLite по пути из конфигурации и создание схемы
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Connecting to database: {}", absolute_path.display());
    let mut options = ConnectOptions::new(db_url);
    options.sqlx_logging(false);
    let conn = Database::connect(options).await?;

    bootstrap_schema(&conn).await?;
    Ok(conn)
}

/// Отдельная in-memory база на каждый тест
#[cfg(test)]
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // Одно соединение: у каждого соединения SQLite своя in-memory база
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

const SCHEMA: &[(&str, &str)] = &[
    (
        "a002_insurance_policy",
        r#"
        CREATE TABLE IF NOT EXISTS a002_insurance_policy (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL,
            comment TEXT,
            max_payout INTEGER NOT NULL,
            premium INTEGER NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a001_cargo_order",
        r#"
        CREATE TABLE IF NOT EXISTS a001_cargo_order (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL,
            comment TEXT,
            customer_id TEXT NOT NULL,
            shipment_leg TEXT NOT NULL,
            customs_hold INTEGER NOT NULL DEFAULT 0,
            origin_inspected INTEGER NOT NULL DEFAULT 0,
            declared_value INTEGER NOT NULL DEFAULT 0,
            insurance_policy_id TEXT REFERENCES a002_insurance_policy(id),
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a003_return_case",
        r#"
        CREATE TABLE IF NOT EXISTS a003_return_case (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL,
            comment TEXT,
            order_id TEXT NOT NULL REFERENCES a001_cargo_order(id),
            customer_id TEXT NOT NULL,
            insurance_policy_id TEXT,
            return_type TEXT NOT NULL,
            details TEXT NOT NULL,
            evidence_photos_json TEXT NOT NULL,
            status TEXT NOT NULL,
            liable_party TEXT NOT NULL,
            liability_reason TEXT NOT NULL,
            requested_amount INTEGER,
            approved_amount INTEGER,
            review_notes TEXT,
            opened_at TEXT NOT NULL,
            reviewed_at TEXT,
            resolved_at TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "idx_a003_return_case_status",
        "CREATE INDEX IF NOT EXISTS idx_a003_return_case_status ON a003_return_case(status);",
    ),
    (
        "a003_return_case_timeline",
        r#"
        CREATE TABLE IF NOT EXISTS a003_return_case_timeline (
            id TEXT PRIMARY KEY NOT NULL,
            case_id TEXT NOT NULL REFERENCES a003_return_case(id),
            at TEXT NOT NULL,
            actor_id TEXT NOT NULL,
            action TEXT NOT NULL,
            from_status TEXT,
            to_status TEXT NOT NULL,
            note TEXT
        );
        "#,
    ),
    (
        "idx_a003_return_case_timeline_case",
        "CREATE INDEX IF NOT EXISTS idx_a003_return_case_timeline_case ON a003_return_case_timeline(case_id, at);",
    ),
    (
        "p901_risk_fund_ledger",
        r#"
        CREATE TABLE IF NOT EXISTS p901_risk_fund_ledger (
            id TEXT PRIMARY KEY NOT NULL,
            created_at TEXT NOT NULL,
            amount INTEGER NOT NULL CHECK (amount <> 0),
            entry_type TEXT NOT NULL,
            description TEXT NOT NULL,
            registrator_ref TEXT REFERENCES a003_return_case(id),
            registrator_type TEXT,
            registrator_code TEXT
        );
        "#,
    ),
    (
        "idx_p901_risk_fund_ledger_created_at",
        "CREATE INDEX IF NOT EXISTS idx_p901_risk_fund_ledger_created_at ON p901_risk_fund_ledger(created_at);",
    ),
    (
        "trg_p901_no_update",
        r#"
        CREATE TRIGGER IF NOT EXISTS trg_p901_no_update
        BEFORE UPDATE ON p901_risk_fund_ledger
        BEGIN
            SELECT RAISE(ABORT, 'ledger entries are immutable');
        END;
        "#,
    ),
    (
        "trg_p901_no_delete",
        r#"
        CREATE TRIGGER IF NOT EXISTS trg_p901_no_delete
        BEFORE DELETE ON p901_risk_fund_ledger
        BEGIN
            SELECT RAISE(ABORT, 'ledger entries are immutable');
        END;
        "#,
    ),
];

/// Ensure required tables exist (minimal schema bootstrap)
pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (name, sql) in SCHEMA {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await
        .map_err(|e| anyhow::anyhow!("schema bootstrap failed at {}: {}", name, e))?;
        tracing::debug!("Schema object ready: {}", name);
    }
    Ok(())
}
