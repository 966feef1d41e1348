//! Zipcode-level statistics: business count, census figures, top categories

use anyhow::Result;
use serde::Serialize;
use sqlx::PgPool;

use super::categories::count_category_tokens;

/// Statistics for a selected postal code
///
/// `population` and `avg_income` come from the census reference table and
/// are `None` when the postal code has no reference row; the join tolerates
/// misses.
#[derive(Debug, Clone, Serialize)]
pub struct ZipcodeStats {
    pub business_count: i64,
    pub population: Option<i64>,
    pub avg_income: Option<f64>,
}

/// A category token and how many businesses in the zip carry it
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Business count plus census population/income for a postal code
pub async fn get_zipcode_stats(pool: &PgPool, zipcode: &str) -> Result<ZipcodeStats> {
    let business_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM businesses WHERE postal_code = $1")
            .bind(zipcode)
            .fetch_one(pool)
            .await?;

    let census: Option<(i64, f64)> =
        sqlx::query_as("SELECT population, avg_income FROM zipcodes WHERE zip_code = $1")
            .bind(zipcode)
            .fetch_optional(pool)
            .await?;

    let (population, avg_income) = match census {
        Some((population, avg_income)) => (Some(population), Some(avg_income)),
        None => (None, None),
    };

    Ok(ZipcodeStats {
        business_count,
        population,
        avg_income,
    })
}

/// Category occurrence counts for a postal code, sorted by count descending
///
/// Ties are broken by category name ascending so the ordering is stable.
pub async fn get_top_categories(pool: &PgPool, zipcode: &str) -> Result<Vec<CategoryCount>> {
    let category_strings: Vec<String> =
        sqlx::query_scalar("SELECT categories FROM businesses WHERE postal_code = $1")
            .bind(zipcode)
            .fetch_all(pool)
            .await?;

    let counts = count_category_tokens(category_strings.iter().map(String::as_str));

    let mut top: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect();
    top.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));

    Ok(top)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_counts(strings: &[&str]) -> Vec<CategoryCount> {
        let counts = count_category_tokens(strings.iter().copied());
        let mut top: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect();
        top.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
        top
    }

    #[test]
    fn test_top_categories_count_and_order() {
        let top = sorted_counts(&["Coffee, Bakery", "Coffee"]);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].category, "Coffee");
        assert_eq!(top[0].count, 2);
        assert_eq!(top[1].category, "Bakery");
        assert_eq!(top[1].count, 1);
    }

    #[test]
    fn test_top_categories_tie_broken_by_name() {
        let top = sorted_counts(&["Bars, Nightlife", "Nightlife, Bars"]);
        assert_eq!(top[0].category, "Bars");
        assert_eq!(top[1].category, "Nightlife");
        assert_eq!(top[0].count, 2);
        assert_eq!(top[1].count, 2);
    }
}
