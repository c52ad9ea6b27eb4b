//! Benchmarks for layout, offset mapping and the edit-render cycle.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use markedit::document::{Compiler, MarkdownCompiler};
use markedit::dom::RowLayout;
use markedit::editor::{Editor, EditorOptions, InputEvent, Key};
use markedit::host::MemoryHost;
use markedit::offset::{TextOffset, node_to_offset, offset_to_node};

const SAMPLE: &str = include_str!("../tests/fixtures/sample.md");

fn bench_row_layout(c: &mut Criterion) {
    let tree = Compiler::default().compile(SAMPLE);
    c.bench_function("row_layout", |b| b.iter(|| RowLayout::compute(black_box(&tree))));
}

fn bench_offset_roundtrip(c: &mut Criterion) {
    let tree = Compiler::default().compile(SAMPLE);
    let middle = SAMPLE.chars().count() / 2;
    c.bench_function("offset_roundtrip", |b| {
        b.iter(|| {
            offset_to_node(&tree, tree.root(), TextOffset::At(black_box(middle)), true)
                .map(|position| node_to_offset(&tree, tree.root(), position))
        });
    });
}

fn bench_type_character(c: &mut Criterion) {
    c.bench_function("type_character", |b| {
        b.iter_batched(
            || {
                Editor::new(
                    MemoryHost::new(24),
                    EditorOptions::new().with_default_value(SAMPLE),
                )
            },
            |mut editor| {
                editor.handle(InputEvent::key(Key::Char('x')));
                editor
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_row_layout,
    bench_offset_roundtrip,
    bench_type_character
);
criterion_main!(benches);
