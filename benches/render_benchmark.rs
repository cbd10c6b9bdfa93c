//! Benchmarks for midmark rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks render synthetic mid-data documents.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use midmark::model::{Block, Document, Line, Page, PdfType, Span};
use midmark::render::{ContentListRenderer, MarkdownRenderer};
use midmark::text::WordSegmenter;

/// Creates a synthetic document with the given number of pages.
fn create_test_document(page_count: usize) -> Document {
    let pages = (0..page_count)
        .map(|i| {
            Page::with_blocks(
                i,
                vec![
                    Block::title(vec![Line::single(Span::text(format!("Section {}", i + 1)))]),
                    Block::text(vec![
                        Line::new(vec![
                            Span::text("Benchmark content with an inline equation"),
                            Span::inline_equation("e^{i\\pi} + 1 = 0"),
                        ]),
                        Line::single(Span::text("and a run-together wordsegmentationbenchmark.")),
                    ]),
                    Block::text_line("中文段落用于测试脚本检测。"),
                    Block::interline_equation("\\sum_{k=1}^{n} k = \\frac{n(n+1)}{2}"),
                    Block::image(
                        format!("page{}_fig.png", i),
                        Some(vec![Line::single(Span::text("Figure caption"))]),
                    ),
                    Block::table(format!("page{}_table.png", i), None, None),
                ],
            )
        })
        .collect();
    Document::with_pages(PdfType::Txt, pages)
}

/// Benchmark long-word segmentation.
fn bench_segmentation(c: &mut Criterion) {
    let segmenter = WordSegmenter::default();

    c.bench_function("split_long_words", |b| {
        b.iter(|| segmenter.split_long_words(black_box("thequickbrownfoxjumpsoverthelazydog, again")));
    });

    c.bench_function("split_short_words", |b| {
        b.iter(|| segmenter.split_long_words(black_box("nothing here needs splitting at all")));
    });
}

/// Benchmark rendering at various sizes.
fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    let markdown = MarkdownRenderer::default();
    let content_list = ContentListRenderer::default();

    for page_count in [1, 10, 50].iter() {
        let doc = create_test_document(*page_count);

        group.bench_function(format!("markdown_{}_pages", page_count), |b| {
            b.iter(|| markdown.render(black_box(&doc), "images"));
        });

        group.bench_function(format!("content_list_{}_pages", page_count), |b| {
            b.iter(|| content_list.render(black_box(&doc), "images"));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_segmentation, bench_rendering);
criterion_main!(benches);
