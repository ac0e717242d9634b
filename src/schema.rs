//! Interprets the `sql` text of a `sqlite_schema` row as a `CREATE TABLE`
//! statement, substituting for an embedded SQL parser collaborator.
//! Produces the same shape `PRAGMA table_info` would.

use pest::Parser;

#[derive(pest_derive::Parser)]
#[grammar = "sql.pest"]
struct SqlParser;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("could not parse CREATE TABLE syntax: {0}")]
    Syntax(#[from] Box<pest::error::Error<Rule>>),
    #[error("CREATE TABLE statement did not declare any columns")]
    NoColumns,
}

/// One column of a table, as `PRAGMA table_info` would describe it.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub cid: u32,
    pub name: String,
    pub r#type: String,
    pub notnull: bool,
    pub dflt_value: Option<String>,
    /// 1-based position within the table's primary key, 0 if the column is
    /// not part of it.
    pub pk: u32,
}

/// Parses a `CREATE TABLE` statement into its column descriptors.
pub fn parse_create_table(sql: &str) -> Result<Vec<ColumnDef>, Error> {
    let stmt = SqlParser::parse(Rule::create_stmt, sql)
        .map_err(|e| Error::Syntax(Box::new(e)))?
        .next()
        .expect("create_stmt always produces exactly one pair on success");

    let mut columns = Vec::new();
    let mut pk_order: Vec<String> = Vec::new();

    for part in stmt.into_inner() {
        match part.as_rule() {
            Rule::table_name => {}
            Rule::table_element => {
                let element = part
                    .into_inner()
                    .next()
                    .expect("table_element always wraps one child");
                match element.as_rule() {
                    Rule::column_def => {
                        let (name, is_pk) = parse_column_def(element, &mut columns);
                        if is_pk {
                            pk_order.push(name);
                        }
                    }
                    Rule::table_constraint => {
                        if let Some(inner) = element.into_inner().next() {
                            if inner.as_rule() == Rule::table_primary_key_constraint {
                                for ident in inner.into_inner() {
                                    pk_order.push(unquote(ident.as_str()));
                                }
                            }
                        }
                    }
                    _ => unreachable!("table_element only ever wraps column_def or table_constraint"),
                }
            }
            Rule::EOI => {}
            _ => {}
        }
    }

    if columns.is_empty() {
        return Err(Error::NoColumns);
    }

    for (ordinal, name) in pk_order.iter().enumerate() {
        if let Some(col) = columns.iter_mut().find(|c| &c.name == name) {
            col.pk = (ordinal + 1) as u32;
        }
    }

    Ok(columns)
}

/// Returns the column's name and whether it carried a column-level
/// `PRIMARY KEY` constraint, pushing a fully-formed (but unnumbered) column
/// descriptor onto `columns`.
fn parse_column_def(pair: pest::iterators::Pair<Rule>, columns: &mut Vec<ColumnDef>) -> (String, bool) {
    let mut inner = pair.into_inner();
    let name = unquote(
        inner
            .next()
            .expect("column_def always starts with an identifier")
            .as_str(),
    );
    let r#type = inner
        .next()
        .map(|p| p.as_str().trim().to_lowercase())
        .unwrap_or_default();

    let mut notnull = false;
    let mut dflt_value = None;
    let mut is_pk = false;

    for constraint in inner {
        debug_assert_eq!(constraint.as_rule(), Rule::column_constraint);
        let Some(kind) = constraint.into_inner().next() else {
            continue;
        };
        match kind.as_rule() {
            Rule::not_null_constraint => notnull = true,
            Rule::column_primary_key_constraint => is_pk = true,
            Rule::default_constraint => {
                dflt_value = kind.into_inner().next().map(|lit| lit.as_str().to_string());
            }
            _ => {}
        }
    }

    let cid = columns.len() as u32;
    columns.push(ColumnDef {
        cid,
        name: name.clone(),
        r#type,
        notnull,
        dflt_value,
        pk: 0,
    });
    (name, is_pk)
}

fn unquote(ident: &str) -> String {
    let bytes = ident.as_bytes();
    if bytes.len() >= 2 {
        match (bytes[0], bytes[bytes.len() - 1]) {
            (b'"', b'"') | (b'`', b'`') => return ident[1..ident.len() - 1].to_string(),
            (b'[', b']') => return ident[1..ident.len() - 1].to_string(),
            _ => {}
        }
    }
    ident.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_table() {
        let cols = parse_create_table("CREATE TABLE a (b int)").unwrap();
        assert_eq!(cols.len(), 1);
        assert_eq!(cols[0].name, "b");
        assert_eq!(cols[0].r#type, "int");
        assert!(!cols[0].notnull);
        assert_eq!(cols[0].pk, 0);
    }

    #[test]
    fn not_null_and_default() {
        let cols =
            parse_create_table("create table t (a text not null default 'x', b int default 3)")
                .unwrap();
        assert!(cols[0].notnull);
        assert_eq!(cols[0].dflt_value.as_deref(), Some("'x'"));
        assert_eq!(cols[1].dflt_value.as_deref(), Some("3"));
    }

    #[test]
    fn column_level_primary_key() {
        let cols = parse_create_table("CREATE TABLE t (id integer primary key, name text)").unwrap();
        assert_eq!(cols[0].pk, 1);
        assert_eq!(cols[1].pk, 0);
    }

    #[test]
    fn table_level_composite_primary_key() {
        let cols = parse_create_table(
            "CREATE TABLE t (a int, b int, c int, primary key (b, a))",
        )
        .unwrap();
        assert_eq!(cols[0].pk, 2); // a
        assert_eq!(cols[1].pk, 1); // b
        assert_eq!(cols[2].pk, 0); // c
    }

    #[test]
    fn quoted_identifiers() {
        let cols = parse_create_table(r#"CREATE TABLE "my table" ("my col" int)"#).unwrap();
        assert_eq!(cols[0].name, "my col");
    }

    #[test]
    fn ignores_unsupported_constraint_forms() {
        let cols = parse_create_table(
            "CREATE TABLE t (a int references other(id), b text collate nocase, check (a > 0))",
        )
        .unwrap();
        assert_eq!(cols.len(), 2);
    }

    #[test]
    fn empty_sql_is_a_syntax_error() {
        assert!(parse_create_table("not sql at all").is_err());
    }

    #[test]
    fn multiple_tables_schema() {
        let cases = [
            ("create table t1 (a int)", 1),
            ("create table t2 (a int, b int)", 2),
            ("create table t3 (a text, b int, c text, d int, e real)", 5),
        ];
        for (sql, expected_cols) in cases {
            assert_eq!(parse_create_table(sql).unwrap().len(), expected_cols);
        }
    }
}
