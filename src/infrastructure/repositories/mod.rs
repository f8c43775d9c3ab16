// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};
use sea_orm::DbErr;

use crate::domain::repositories::RepositoryError;

pub mod account_repo_impl;
pub mod catalog_repo_impl;
pub mod city_repo_impl;
pub mod interaction_repo_impl;
pub mod listing_repo_impl;
pub mod taxonomy_repo_impl;

/// Current time in the column type used by every timestamp
pub(crate) fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}

/// Escape LIKE wildcards so the needle matches literally
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `lower(col) LIKE '%needle%' ESCAPE '\'`
pub(crate) fn icontains<C: IntoColumnRef>(col: C, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(pattern).escape('\\'))
}

/// `lower(col) = value`
pub(crate) fn iequals<C: IntoColumnRef>(col: C, value: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col))).eq(value.to_lowercase())
}

/// Map unique constraint violations to `Conflict`
pub(crate) fn conflict_or_db(err: DbErr, what: &str) -> RepositoryError {
    let message = err.to_string().to_lowercase();
    if message.contains("unique") || message.contains("duplicate") {
        RepositoryError::Conflict(what.to_string())
    } else {
        RepositoryError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like(r"a\b"), r"a\\b");
        assert_eq!(escape_like("plain"), "plain");
    }
}
