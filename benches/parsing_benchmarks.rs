use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use scara_gcode::parse_line;
use std::hint::black_box;

/// Generate G-code content of different patterns for benchmarking
fn generate_gcode_content(lines: usize, pattern: &str) -> String {
    let mut content = String::new();

    match pattern {
        "movement_heavy" => {
            for i in 0..lines {
                content.push_str(&format!(
                    "G1 X{:.3} Y{:.3} F2\n",
                    4.0 + (i % 40) as f32 * 0.1,
                    4.0 + (i % 30) as f32 * 0.1
                ));
            }
        }
        "comment_heavy" => {
            for i in 0..lines {
                content.push_str(&format!(
                    "G1 X{:.1} Y{:.1} ; segment {}, pass {}\n",
                    (i % 8) as f32,
                    (i % 6) as f32,
                    i,
                    i / 100
                ));
            }
        }
        _ => {
            for i in 0..lines {
                match i % 4 {
                    0 => content.push_str(&format!("G0 X{} Y5\n", 4 + i % 4)),
                    1 => content.push_str("; pen down\n"),
                    2 => content.push_str("G2 X6 Y6 I1 J0\n"),
                    3 => content.push_str("G4 P0.5\n"),
                    _ => unreachable!(),
                }
            }
        }
    }

    content
}

/// Benchmark parsing single lines with different shapes
fn bench_single_line_parsing(c: &mut Criterion) {
    let test_lines = [
        ("simple_move", "G1 X10 Y20"),
        ("arc", "G2 X6.125 Y6.5 I1.0 J-0.25 F2.5"),
        ("with_comment", "G1 X10 Y20 ; Move to next position"),
        ("malformed_words", "G1 X1O Y2 F Q?"),
        ("comment_only", "; just a comment"),
    ];

    let mut group = c.benchmark_group("single_line_parsing");
    for (name, line) in test_lines {
        group.bench_with_input(BenchmarkId::from_parameter(name), line, |b, line| {
            b.iter(|| parse_line(black_box(line)))
        });
    }
    group.finish();
}

/// Benchmark parsing whole programs line by line
fn bench_program_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("program_parsing");

    for pattern in ["movement_heavy", "comment_heavy", "mixed"] {
        let content = generate_gcode_content(10_000, pattern);
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(pattern), &content, |b, content| {
            b.iter(|| {
                content
                    .lines()
                    .filter_map(|line| parse_line(black_box(line)))
                    .count()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_line_parsing, bench_program_parsing);
criterion_main!(benches);
