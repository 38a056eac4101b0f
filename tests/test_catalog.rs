//! Catalog pipeline tests: filtering, sorting, clamping and view state.

mod common;

use card_haven_sdk::catalog::{
    rarity_highlights, CatalogSnapshot, CatalogView, FilterState, PriceRange, SortMode,
    NO_PRODUCTS_MESSAGE, TOP_RARITIES,
};
use common::names;

fn view() -> CatalogView {
    CatalogView::new(common::sample_snapshot())
}

// ---------------------------------------------------------------------------
// Neutral state
// ---------------------------------------------------------------------------

#[test]
fn neutral_filters_keep_everything_in_order() {
    let v = view();
    assert_eq!(v.filtered(), v.products());
    assert_eq!(
        names(v.filtered()),
        vec!["Charizard", "Pikachu", "Black Lotus", "Ángel Guardián", "Zubat"]
    );
    assert!(v.error_message().is_none());
}

#[test]
fn price_bounds_and_years_come_from_the_data() {
    let v = view();
    assert_eq!(v.price_bounds(), PriceRange::new(2.0, 1000.0));
    assert_eq!(v.filters().price, v.price_bounds());
    assert_eq!(v.available_years(), &[2024, 2023, 2022]);
}

#[test]
fn filtered_is_always_a_subset() {
    let products = common::sample_products();
    let mut states = Vec::new();
    for term in ["", "a", "fire", "zzz"] {
        for stock in [false, true] {
            for year in ["", "2024", "1999"] {
                let mut f = FilterState::with_price(PriceRange::new(5.0, 500.0));
                f.search_term = term.to_string();
                f.in_stock_only = stock;
                f.year = year.to_string();
                f.categories.insert(1);
                f.ratings.insert(3);
                f.sort = SortMode::NameDesc;
                states.push(f);
            }
        }
    }
    for f in states {
        let out = f.apply(&products);
        assert!(out.len() <= products.len());
        for p in &out {
            assert!(products.contains(p), "{} not in source list", p.name);
        }
    }
}

// ---------------------------------------------------------------------------
// Individual filters
// ---------------------------------------------------------------------------

#[test]
fn search_matches_name_or_description_case_insensitively() {
    let mut v = view();
    v.set_search("PIKA");
    assert_eq!(names(v.filtered()), vec!["Pikachu"]);

    v.set_search("fire type");
    assert_eq!(names(v.filtered()), vec!["Charizard"]);

    v.set_search("nothing like this");
    assert!(v.filtered().is_empty());

    v.set_search("");
    assert_eq!(v.filtered().len(), 5);
}

#[test]
fn category_toggle_filters_and_restores() {
    let mut v = view();
    v.toggle_category(2);
    assert_eq!(names(v.filtered()), vec!["Black Lotus", "Ángel Guardián"]);
    v.toggle_category(2);
    assert_eq!(v.filtered().len(), 5);
    assert!(v.filters().categories.is_empty());
}

#[test]
fn facets_combine_with_and_across_and_or_within() {
    let mut v = view();
    v.toggle_category(1);
    v.toggle_rarity(4);
    v.toggle_rarity(2);
    assert_eq!(names(v.filtered()), vec!["Charizard", "Zubat"]);

    v.toggle_condition(3);
    assert_eq!(names(v.filtered()), vec!["Zubat"]);

    v.toggle_collection(11);
    assert!(v.filtered().is_empty());
}

#[test]
fn in_stock_only_drops_sold_out() {
    let mut v = view();
    v.set_in_stock_only(true);
    assert!(!names(v.filtered()).contains(&"Pikachu"));
    assert_eq!(v.filtered().len(), 4);
}

#[test]
fn rating_thresholds_pass_if_any_is_reached() {
    let mut v = view();
    v.toggle_rating(4);
    assert_eq!(names(v.filtered()), vec!["Charizard", "Ángel Guardián"]);

    v.toggle_rating(1);
    assert_eq!(
        names(v.filtered()),
        vec!["Charizard", "Pikachu", "Ángel Guardián", "Zubat"]
    );
}

#[test]
fn year_filter_requires_a_parseable_date() {
    let mut v = view();
    v.set_year("2024");
    assert_eq!(names(v.filtered()), vec!["Pikachu", "Zubat"]);

    v.set_year("1999");
    assert!(v.filtered().is_empty());

    v.set_year("");
    assert_eq!(v.filtered().len(), 5);
}

#[test]
fn price_range_is_clamped_before_filtering() {
    let mut v = view();
    v.set_price_range(5.0, 200.0);
    assert_eq!(v.filters().price, PriceRange::new(5.0, 200.0));
    assert_eq!(
        names(v.filtered()),
        vec!["Charizard", "Pikachu", "Ángel Guardián"]
    );

    v.set_price_range(0.0, 5000.0);
    assert_eq!(v.filters().price, PriceRange::new(2.0, 1000.0));
    assert_eq!(v.filtered().len(), 5);

    v.set_price_range(130.0, 40.0);
    assert_eq!(v.filters().price, PriceRange::new(40.0, 130.0));
    assert_eq!(names(v.filtered()), vec!["Charizard", "Ángel Guardián"]);
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[test]
fn price_asc_sorts_numerically() {
    let mut products = vec![
        common::product(1, "a", 30.0),
        common::product(2, "b", 10.0),
        common::product(3, "c", 20.0),
    ];
    SortMode::PriceAsc.sort(&mut products);
    let prices: Vec<f64> = products.iter().map(|p| p.price()).collect();
    assert_eq!(prices, vec![10.0, 20.0, 30.0]);
}

#[test]
fn missing_price_sorts_as_zero_and_skips_bounds() {
    let mut products = common::sample_products();
    let mut no_price = common::product(6, "NoPrice", 1.0);
    no_price.price = None;
    products.push(no_price);

    let mut view = CatalogView::new(CatalogSnapshot {
        products,
        ..Default::default()
    });
    assert_eq!(view.price_bounds(), PriceRange::new(2.0, 1000.0));
    assert!(!names(view.filtered()).contains(&"NoPrice"));

    let mut sorted = view.products().to_vec();
    SortMode::PriceAsc.sort(&mut sorted);
    assert_eq!(sorted[0].name, "NoPrice");
    SortMode::PriceDesc.sort(&mut sorted);
    assert_eq!(sorted.last().map(|p| p.name.as_str()), Some("NoPrice"));

    view.reset_filters();
    assert_eq!(view.filtered().len(), 5);
}

#[test]
fn name_desc_sorts_reverse_alphabetically() {
    let mut products = vec![
        common::product(1, "Ana", 1.0),
        common::product(2, "Zoe", 1.0),
        common::product(3, "Mia", 1.0),
    ];
    SortMode::NameDesc.sort(&mut products);
    assert_eq!(names(&products), vec!["Zoe", "Mia", "Ana"]);
}

#[test]
fn sorts_are_stable_on_ties() {
    let mut products = vec![
        common::product(1, "first", 5.0),
        common::product(2, "second", 1.0),
        common::product(3, "third", 5.0),
    ];
    SortMode::PriceDesc.sort(&mut products);
    assert_eq!(names(&products), vec!["first", "third", "second"]);
}

#[test]
fn name_asc_ignores_accents() {
    let mut v = view();
    v.set_sort(SortMode::NameAsc);
    assert_eq!(
        names(v.filtered()),
        vec!["Ángel Guardián", "Black Lotus", "Charizard", "Pikachu", "Zubat"]
    );
}

#[test]
fn date_sorts_treat_missing_as_epoch() {
    let mut v = view();
    v.set_sort(SortMode::DateDesc);
    assert_eq!(
        names(v.filtered()),
        vec!["Zubat", "Pikachu", "Charizard", "Black Lotus", "Ángel Guardián"]
    );
    v.set_sort(SortMode::DateAsc);
    assert_eq!(names(v.filtered())[0], "Ángel Guardián");
}

#[test]
fn rating_desc_uses_average() {
    let mut v = view();
    v.set_sort(SortMode::RatingDesc);
    assert_eq!(
        names(v.filtered()),
        vec!["Charizard", "Ángel Guardián", "Pikachu", "Zubat", "Black Lotus"]
    );
}

#[test]
fn relevance_preserves_filter_order() {
    let mut v = view();
    v.set_sort(SortMode::PriceAsc);
    v.set_sort(SortMode::from_tag("relevance"));
    assert_eq!(v.filtered(), v.products());
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

#[test]
fn reset_restores_neutral_filters() {
    let mut v = view();
    v.set_search("zu");
    v.toggle_category(1);
    v.toggle_rating(2);
    v.set_in_stock_only(true);
    v.set_year("2024");
    v.set_price_range(3.0, 4.0);
    v.set_sort(SortMode::NameDesc);
    v.reset_filters();

    assert_eq!(v.filters(), &FilterState::with_price(v.price_bounds()));
    assert_eq!(v.filtered(), v.products());
}

#[test]
fn facet_counts_cover_the_full_list() {
    let mut v = view();
    v.set_search("zubat");
    assert_eq!(v.count_by_category(1), 3);
    assert_eq!(v.count_by_category(2), 2);
    assert_eq!(v.count_by_collection(10), 2);
    assert_eq!(v.count_by_rarity(5), 1);
    assert_eq!(v.count_by_condition(2), 2);
    assert_eq!(v.count_by_rating(4), 2);
    assert_eq!(v.count_by_rating(0), 1);
    assert_eq!(v.count_by_rating(5), 0);
}

#[test]
fn empty_catalog_reports_notice() {
    let v = CatalogView::new(CatalogSnapshot::default());
    assert!(v.filtered().is_empty());
    assert_eq!(v.error_message(), Some(NO_PRODUCTS_MESSAGE));
    assert_eq!(v.price_bounds(), PriceRange::default());
}

#[test]
fn replace_products_keeps_narrowed_filters() {
    let mut v = view();
    v.set_price_range(5.0, 200.0);
    v.toggle_category(1);
    assert!(v.select(1));

    let mut fresh = common::sample_products();
    fresh.retain(|p| p.id != 2);
    v.replace_products(fresh);

    assert_eq!(v.filters().price, PriceRange::new(5.0, 200.0));
    assert_eq!(names(v.filtered()), vec!["Charizard"]);
    assert_eq!(v.selected().map(|p| p.id), Some(1));

    v.replace_products(Vec::new());
    assert!(v.selected().is_none());
    assert_eq!(v.error_message(), Some(NO_PRODUCTS_MESSAGE));
}

#[test]
fn untouched_price_range_follows_new_bounds() {
    let mut v = view();
    v.replace_products(vec![common::product(9, "Mew", 300.0)]);
    assert_eq!(v.price_bounds(), PriceRange::new(300.0, 300.0));
    assert_eq!(names(v.filtered()), vec!["Mew"]);
}

#[test]
fn selection() {
    let mut v = view();
    assert!(!v.select(42));
    assert!(v.select(3));
    assert_eq!(v.selected().map(|p| p.name.as_str()), Some("Black Lotus"));
    v.clear_selection();
    assert!(v.selected().is_none());
}

// ---------------------------------------------------------------------------
// Rarity highlights
// ---------------------------------------------------------------------------

#[test]
fn highlights_take_the_three_rarest_tiers() {
    let out = rarity_highlights(
        &common::sample_rarities(),
        &common::sample_products(),
        TOP_RARITIES,
    );
    assert_eq!(
        names(&out),
        vec!["Black Lotus", "Charizard", "Ángel Guardián"]
    );
}

#[test]
fn highlights_skip_products_without_rarity() {
    let mut products = common::sample_products();
    products[2].rarity = None;
    let out = rarity_highlights(&common::sample_rarities(), &products, 1);
    assert!(out.is_empty());
}
