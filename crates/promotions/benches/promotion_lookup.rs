use chrono::{Duration, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use storefront_catalog::{Item, ItemKind};
use storefront_core::DocumentId;
use storefront_promotions::{
    DiscountType, Promotion, PromotionStatus, TransactionFee, price_item_at,
};

fn promotions(count: usize) -> Vec<Promotion> {
    let now = Utc::now();
    (0..count)
        .map(|i| Promotion {
            id: Some(DocumentId::from(format!("promo-{i}"))),
            name: format!("Promotion {i}"),
            description: None,
            status: if i % 3 == 0 {
                PromotionStatus::Inactive
            } else {
                PromotionStatus::Active
            },
            start_date: (now - Duration::days(1)).into(),
            end_date: (now + Duration::days(1)).into(),
            discount_type: DiscountType::Percentage,
            discount: Decimal::from(10),
            product_ids: (0..20).map(|p| DocumentId::from(format!("p-{i}-{p}"))).collect(),
            service_ids: vec![DocumentId::from(i as i64)],
        })
        .collect()
}

/// Worst case: the item is covered by no promotion, so every one is scanned.
fn bench_uncovered_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("price_item_uncovered");
    let item = Item::new(ItemKind::Product, "Mug", Decimal::from(25)).with_id("missing");
    let fee = TransactionFee::new(Decimal::new(3, 2));

    for count in [10usize, 100, 1_000] {
        let promos = promotions(count);
        let now = Utc::now();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &promos, |b, promos| {
            b.iter(|| price_item_at(black_box(&item), black_box(promos), &fee, now))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_uncovered_lookup);
criterion_main!(benches);
