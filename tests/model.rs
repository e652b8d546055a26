//! Properties of the reference models that the live scenarios rely on.
use demo_e2e::model::shop::{dollars, Cart, Product, SortOrder, CATALOG, TAX_PERCENT};
use demo_e2e::model::todos::{counter_text, Filter, TodoList};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn title() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,15}"
}

fn filter() -> impl Strategy<Value = Filter> {
    prop::sample::select(Filter::ALL.to_vec())
}

/// A list of the given titles with the flagged ones completed.
fn seeded(items: &[(String, bool)]) -> TodoList {
    let mut list = TodoList::new();
    for (i, (title, done)) in items.iter().enumerate() {
        assert!(list.add(title));
        list.set_completed(i, *done).unwrap();
    }
    list
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn adding_n_todos_counts_n(titles in prop::collection::vec(title(), 0..20)) {
        let mut list = TodoList::new();
        for t in &titles {
            prop_assert!(list.add(t));
        }
        prop_assert_eq!(list.len(), titles.len());
        prop_assert_eq!(list.active_count(), titles.len());
        prop_assert_eq!(list.footer_visible(), !titles.is_empty());

        let counter = list.counter_text();
        prop_assert_eq!(counter.contains("item left"), titles.len() == 1);
        prop_assert!(counter.starts_with(&titles.len().to_string()));
    }

    #[test]
    fn blank_text_is_never_added(
        items in prop::collection::vec((title(), any::<bool>()), 0..10),
        blank in "[ \t]{0,6}",
    ) {
        let mut list = seeded(&items);
        let before = list.clone();
        prop_assert!(!list.add(&blank));
        prop_assert_eq!(list, before);
    }

    #[test]
    fn toggling_twice_is_a_round_trip(
        items in prop::collection::vec((title(), any::<bool>()), 1..10),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut list = seeded(&items);
        let before = list.clone();
        let index = pick.index(items.len());
        list.toggle(index).unwrap();
        prop_assert_ne!(&list, &before);
        list.toggle(index).unwrap();
        prop_assert_eq!(list, before);
    }

    #[test]
    fn filters_partition_the_list(
        items in prop::collection::vec((title(), any::<bool>()), 0..12),
        shown in filter(),
    ) {
        let mut list = seeded(&items);
        list.set_filter(shown);
        let visible = list.visible().len();

        list.set_filter(Filter::Active);
        let active = list.visible().len();
        list.set_filter(Filter::Completed);
        let completed = list.visible().len();
        list.set_filter(Filter::All);

        prop_assert_eq!(active + completed, list.len());
        prop_assert_eq!(active, list.active_count());
        prop_assert!(visible <= list.len());
        // the counter does not depend on the filter
        prop_assert_eq!(list.counter_text(), counter_text(active));
    }

    #[test]
    fn filtered_titles_keep_list_order(
        items in prop::collection::vec((title(), any::<bool>()), 0..12),
        shown in filter(),
    ) {
        let mut list = seeded(&items);
        list.set_filter(shown);
        let expected: Vec<&str> = items
            .iter()
            .filter(|(_, done)| match shown {
                Filter::All => true,
                Filter::Active => !done,
                Filter::Completed => *done,
            })
            .map(|(t, _)| t.trim())
            .collect();
        prop_assert_eq!(list.visible_titles(), expected);
    }

    #[test]
    fn clear_completed_leaves_only_active(
        items in prop::collection::vec((title(), any::<bool>()), 0..12),
    ) {
        let mut list = seeded(&items);
        let active = list.active_count();
        let removed = list.clear_completed();
        prop_assert_eq!(removed, items.iter().filter(|(_, d)| *d).count());
        prop_assert_eq!(list.len(), active);
        prop_assert!(!list.clear_completed_visible());
        prop_assert!(list.todos().iter().all(|t| !t.completed));
    }

    #[test]
    fn delete_shifts_later_items_up(
        items in prop::collection::vec((title(), any::<bool>()), 1..10),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut list = seeded(&items);
        let before: Vec<_> = list.todos().to_vec();
        let index = pick.index(items.len());

        let removed = list.delete(index).unwrap();
        prop_assert_eq!(&removed, &before[index]);
        let expected = [&before[..index], &before[index + 1..]].concat();
        prop_assert_eq!(list.todos(), &expected[..]);
        prop_assert!(list.delete(list.len()).is_err());
    }

    #[test]
    fn toggle_all_agrees_on_every_item(
        items in prop::collection::vec((title(), any::<bool>()), 1..10),
    ) {
        let mut list = seeded(&items);
        let all_done = items.iter().all(|(_, d)| *d);
        list.toggle_all();
        prop_assert!(list.todos().iter().all(|t| t.completed != all_done));
    }

    #[test]
    fn cart_total_adds_rounded_tax(slugs in prop::sample::subsequence(
        CATALOG.iter().map(|p| p.slug()).collect::<Vec<_>>(),
        0..=CATALOG.len(),
    )) {
        let mut cart = Cart::new();
        for slug in &slugs {
            prop_assert!(cart.add(slug));
            prop_assert!(!cart.add(slug));
        }
        prop_assert_eq!(cart.len(), slugs.len());
        prop_assert_eq!(cart.badge().is_none(), slugs.is_empty());

        let summary = cart.summary();
        let subtotal: u32 = slugs
            .iter()
            .map(|s| Product::by_slug(s).unwrap().price_cents)
            .sum();
        prop_assert_eq!(summary.subtotal, subtotal);
        prop_assert!(summary.tax * 100 <= subtotal * TAX_PERCENT + 50);
        prop_assert_eq!(summary.total, summary.subtotal + summary.tax);
        prop_assert!(dollars(summary.total).starts_with('$'));
    }
}

#[test]
fn every_sort_order_is_a_permutation_of_the_catalog() {
    for order in [
        SortOrder::NameAsc,
        SortOrder::NameDesc,
        SortOrder::PriceAsc,
        SortOrder::PriceDesc,
    ] {
        let mut sorted = order.sorted();
        assert_eq!(sorted.len(), CATALOG.len());
        sorted.sort_by(|a, b| a.name.cmp(b.name));
        assert_eq!(sorted, SortOrder::NameAsc.sorted(), "{:?}", order);
    }
}

#[test]
fn price_orders_are_monotonic() {
    let asc = SortOrder::PriceAsc.sorted();
    assert!(asc.windows(2).all(|w| w[0].price_cents <= w[1].price_cents));
    let desc = SortOrder::PriceDesc.sorted();
    assert!(desc.windows(2).all(|w| w[0].price_cents >= w[1].price_cents));
}
