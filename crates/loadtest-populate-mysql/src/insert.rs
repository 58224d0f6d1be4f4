//! Batched INSERT/REPLACE statement building.

use crate::value::MySQLValue;
use loadtest_generator::{SyntheticRecord, WriteMode};
use mysql_async::Value;

/// Maximum number of `?` placeholders MySQL accepts in one prepared statement.
pub const MAX_PLACEHOLDERS: usize = 65_535;

/// A multi-row write ready to execute.
#[derive(Debug, Clone)]
pub struct BatchStatement {
    /// SQL text with one `(?, ...)` group per row.
    pub sql: String,
    /// Positional parameters, row-major.
    pub params: Vec<Value>,
    /// Number of rows carried.
    pub rows: usize,
}

/// Quote an identifier with backticks, doubling embedded backticks.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Build the statement text for `rows` rows.
pub fn batch_sql(mode: WriteMode, table: &str, columns: &[&str], rows: usize) -> String {
    let col_placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
    let row_template = format!("({})", col_placeholders.join(", "));
    let rows_template: Vec<&str> = (0..rows).map(|_| row_template.as_str()).collect();

    format!(
        "{} INTO {} ({}) VALUES {}",
        mode.keyword(),
        quote_identifier(table),
        columns
            .iter()
            .map(|c| quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", "),
        rows_template.join(", ")
    )
}

/// Build a multi-row statement carrying all `records`.
///
/// Records must have one value per column.
pub fn build_batch_statement(
    mode: WriteMode,
    table: &str,
    columns: &[&str],
    records: Vec<SyntheticRecord>,
) -> BatchStatement {
    let rows = records.len();
    let sql = batch_sql(mode, table, columns, rows);

    let mut params: Vec<Value> = Vec::with_capacity(rows * columns.len());
    for record in records {
        debug_assert_eq!(record.arity(), columns.len());
        params.extend(
            record
                .values
                .into_iter()
                .map(|v| MySQLValue::from(v).into_inner()),
        );
    }

    BatchStatement { sql, params, rows }
}

/// Generate TRUNCATE TABLE statement.
pub fn generate_truncate_table(table_name: &str) -> String {
    format!("TRUNCATE TABLE {}", quote_identifier(table_name))
}

/// Generate row count query.
pub fn generate_count_rows(table_name: &str) -> String {
    format!("SELECT COUNT(*) FROM {}", quote_identifier(table_name))
}
