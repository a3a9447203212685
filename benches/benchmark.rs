//! Performance benchmarks for wiki-unitstats.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - A synthetic unit page with tables and an infobox
//! - A prose-only page that falls through to the pattern scan
//! - Saved wiki pages from `../data/unit_pages`, when present

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wiki_unitstats::{extract, extract_with_options, Options};
use std::fs;

const UNIT_PAGE: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Militia | Unit Wiki</title></head>
<body>
    <aside class="portable-infobox">
        <div data-source="hitpoints"><h3>Hitpoints</h3><div class="pi-data-value">15</div></div>
        <div data-source="speed"><h3>Speed</h3><div class="pi-data-value">24</div></div>
        <div data-source="attack_range"><h3>Range</h3><div class="pi-data-value">1</div></div>
    </aside>
    <h2>Statistics</h2>
    <table class="wikitable">
        <tr><th>Level</th><th>HP</th><th>Attack</th><th>Cost</th></tr>
        <tr><td>1</td><td>15</td><td>2.5</td><td>100</td></tr>
        <tr><td>2</td><td>17</td><td>2.8</td><td>120</td></tr>
        <tr><td>3</td><td>19</td><td>3.1</td><td>145</td></tr>
        <tr><td>4</td><td>21</td><td>3.5</td><td>175</td></tr>
    </table>
    <h2>Damage</h2>
    <table class="wikitable">
        <tr><th>Target</th><th>Multiplier</th></tr>
        <tr><td>Unarmored</td><td>1.0</td></tr>
        <tr><td>Light Armor</td><td>0.5</td></tr>
        <tr><td>Heavy Armor</td><td>0.25</td></tr>
    </table>
</body>
</html>
"#;

const PROSE_PAGE: &str = r#"
<html><body>
    <p>The nuclear rocket launcher is a late-game unit.</p>
    <p>Hitpoints: 30, Speed: 8, Attack: 120, Range: 45, View range: 60.</p>
    <ul>
        <li>vs. Unarmored: 80</li>
        <li>vs. Buildings: 300</li>
        <li>vs. Morale: 20</li>
    </ul>
</body></html>
"#;

fn bench_extract_default(c: &mut Criterion) {
    c.bench_function("extract_unit_page", |b| {
        b.iter(|| extract(black_box(UNIT_PAGE), "militia"));
    });
}

fn bench_pattern_fallback(c: &mut Criterion) {
    c.bench_function("extract_prose_page", |b| {
        b.iter(|| extract(black_box(PROSE_PAGE), "nuclear_rockets"));
    });
}

fn bench_extract_with_options(c: &mut Criterion) {
    let options = Options {
        always_scan_patterns: true,
        ..Options::default()
    };

    c.bench_function("extract_always_patterns", |b| {
        b.iter(|| extract_with_options(black_box(UNIT_PAGE), "militia", black_box(&options)));
    });
}

/// Benchmark with saved wiki pages of varying sizes
fn bench_real_world_html(c: &mut Criterion) {
    let html_dir = "../data/unit_pages";
    let sample_files = ["militia.html", "tanks.html", "nuclear_rockets.html"];

    let mut group = c.benchmark_group("real_world");

    for filename in &sample_files {
        let path = format!("{html_dir}/{filename}");
        if let Ok(html) = fs::read_to_string(&path) {
            let size_kb = html.len() / 1024;
            group.throughput(Throughput::Bytes(html.len() as u64));
            group.bench_with_input(
                BenchmarkId::new("extract", format!("{filename} ({size_kb}KB)")),
                &html,
                |b, html| {
                    b.iter(|| extract(black_box(html), "page"));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_extract_default,
    bench_pattern_fallback,
    bench_extract_with_options,
    bench_real_world_html
);
criterion_main!(benches);
