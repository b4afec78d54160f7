// 📊 Client Analysis - fixed battery of analytical queries
// Each query is executed independently: a failing query is reported in the
// output and the batch moves on to the next one.

use rusqlite::Connection;
use std::io::{self, Write};

use crate::format::{display_value, render_table, NO_DATA};

// ============================================================================
// QUERY DEFINITIONS
// ============================================================================

/// How a query's result is fetched and printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// First column of the first row
    Scalar,

    /// All rows, with a header of column names
    Tabular,
}

#[derive(Debug, Clone, Copy)]
pub struct AnalyticalQuery {
    pub sql: &'static str,
    pub title: &'static str,
    pub shape: ResultShape,
}

/// The report, in print order
pub const ANALYTICAL_QUERIES: [AnalyticalQuery; 6] = [
    AnalyticalQuery {
        sql: "SELECT COUNT(*) FROM clients WHERE active = 0 AND balance > 100000",
        title: "1. Inactive clients with balance > 100000",
        shape: ResultShape::Scalar,
    },
    AnalyticalQuery {
        sql: "SELECT country, AVG(credit_rating) AS avg_credit_rating
              FROM client_details
              GROUP BY country
              ORDER BY country",
        title: "2. Average credit rating by country",
        shape: ResultShape::Tabular,
    },
    AnalyticalQuery {
        sql: "WITH card_clients AS (
                  SELECT
                      c.card_type,
                      COUNT(DISTINCT cl.client_id) AS total_clients,
                      COUNT(DISTINCT CASE WHEN cl.active = 0 THEN cl.client_id END) AS inactive_clients
                  FROM cards c
                  JOIN clients cl ON c.client_id = cl.client_id
                  GROUP BY c.card_type
              )
              SELECT
                  card_type,
                  inactive_clients * 100.0 / total_clients AS churn_percentage
              FROM card_clients
              ORDER BY card_type",
        title: "3. Churn percentage by card type",
        shape: ResultShape::Tabular,
    },
    AnalyticalQuery {
        sql: "SELECT
                  cd.client_id,
                  cd.salary,
                  cd.country,
                  cd.salary - country_avg.avg_salary AS salary_diff
              FROM client_details cd
              JOIN (
                  SELECT country, AVG(salary) AS avg_salary
                  FROM client_details
                  GROUP BY country
              ) AS country_avg ON cd.country = country_avg.country
              ORDER BY cd.client_id",
        title: "4. Client salary compared to country average",
        shape: ResultShape::Tabular,
    },
    AnalyticalQuery {
        // client_id is the rowid, so it breaks salary ties in row order
        sql: "WITH top_salaries AS (
                  SELECT
                      country,
                      gender,
                      ROW_NUMBER() OVER (
                          PARTITION BY country ORDER BY salary DESC, client_id
                      ) AS salary_rank
                  FROM client_details
              )
              SELECT country
              FROM (
                  SELECT
                      country,
                      SUM(CASE WHEN gender = 'F' THEN 1 ELSE 0 END) AS women_count,
                      SUM(CASE WHEN gender = 'M' THEN 1 ELSE 0 END) AS men_count
                  FROM top_salaries
                  WHERE salary_rank <= 10
                  GROUP BY country
              ) AS gender_counts
              WHERE women_count > men_count
              ORDER BY country",
        title: "5. Countries where women outnumber men among the top 10 salaries",
        shape: ResultShape::Tabular,
    },
    AnalyticalQuery {
        sql: "WITH all_card_types AS (
                  SELECT DISTINCT card_type FROM cards
              ),
              country_card_usage AS (
                  SELECT cd.country, c.card_type
                  FROM client_details cd
                  JOIN cards c ON cd.client_id = c.client_id
                  GROUP BY cd.country, c.card_type
              )
              SELECT country
              FROM (
                  SELECT
                      a.country,
                      COUNT(DISTINCT u.card_type) AS used_types,
                      (SELECT COUNT(*) FROM all_card_types) AS total_types
                  FROM (SELECT DISTINCT country FROM client_details) a
                  LEFT JOIN country_card_usage u ON a.country = u.country
                  GROUP BY a.country
              ) AS usage_summary
              WHERE used_types < total_types
              ORDER BY country",
        title: "6. Countries not using every card type",
        shape: ResultShape::Tabular,
    },
];

// ============================================================================
// QUERY RESULTS
// ============================================================================

/// Rows converted to display text
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// None when the query returned no rows
    Scalar(Option<String>),
    Table(ResultTable),
}

/// Run one query and collect its result according to `query.shape`
pub fn execute_query(conn: &Connection, query: &AnalyticalQuery) -> rusqlite::Result<QueryResult> {
    let mut stmt = conn.prepare(query.sql)?;

    match query.shape {
        ResultShape::Scalar => {
            let mut rows = stmt.query([])?;
            let value = match rows.next()? {
                Some(row) => Some(display_value(row.get_ref(0)?)),
                None => None,
            };
            Ok(QueryResult::Scalar(value))
        }
        ResultShape::Tabular => {
            let columns: Vec<String> = stmt
                .column_names()
                .into_iter()
                .map(String::from)
                .collect();

            let mut rows = stmt.query([])?;
            let mut table_rows = Vec::new();
            while let Some(row) = rows.next()? {
                let values = (0..columns.len())
                    .map(|i| row.get_ref(i).map(display_value))
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                table_rows.push(values);
            }

            Ok(QueryResult::Table(ResultTable {
                columns,
                rows: table_rows,
            }))
        }
    }
}

// ============================================================================
// REPORT OUTPUT
// ============================================================================

/// Print the titled result block for one query.
///
/// Query errors are written to `out` as text; only write failures on `out`
/// itself are returned.
pub fn execute_and_print<W: Write>(
    conn: &Connection,
    out: &mut W,
    query: &AnalyticalQuery,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}:", query.title)?;

    match execute_query(conn, query) {
        Ok(QueryResult::Scalar(Some(value))) => writeln!(out, "{}", value)?,
        Ok(QueryResult::Scalar(None)) => writeln!(out, "{}", NO_DATA)?,
        Ok(QueryResult::Table(table)) if table.rows.is_empty() => writeln!(out, "{}", NO_DATA)?,
        Ok(QueryResult::Table(table)) => write!(out, "{}", render_table(&table.columns, &table.rows))?,
        Err(e) => writeln!(out, "Error executing query: {}", e)?,
    }

    Ok(())
}

pub fn run_queries<W: Write>(
    conn: &Connection,
    out: &mut W,
    queries: &[AnalyticalQuery],
) -> io::Result<()> {
    for query in queries {
        execute_and_print(conn, out, query)?;
    }

    Ok(())
}

/// Print every query in `ANALYTICAL_QUERIES`
pub fn run_analysis<W: Write>(conn: &Connection, out: &mut W) -> io::Result<()> {
    run_queries(conn, out, &ANALYTICAL_QUERIES)
}
