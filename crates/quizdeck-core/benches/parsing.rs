use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizdeck_core::model::AnswerKeyMode;
use quizdeck_core::parser::{parse_quiz_str, ParseOptions};

fn bench_csv_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("csv_parsing");

    let small_csv = generate_quiz_csv(10);
    let medium_csv = generate_quiz_csv(200);
    let large_csv = generate_quiz_csv(2000);

    group.bench_function("10_questions", |b| {
        b.iter(|| {
            parse_quiz_str(
                black_box(&small_csv),
                black_box("bench.csv".as_ref()),
                ParseOptions::default(),
            )
        })
    });

    group.bench_function("200_questions", |b| {
        b.iter(|| {
            parse_quiz_str(
                black_box(&medium_csv),
                black_box("bench.csv".as_ref()),
                ParseOptions::default(),
            )
        })
    });

    group.bench_function("2000_questions", |b| {
        b.iter(|| {
            parse_quiz_str(
                black_box(&large_csv),
                black_box("bench.csv".as_ref()),
                ParseOptions::default(),
            )
        })
    });

    group.finish();
}

fn bench_answer_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("answer_resolution");
    let options: Vec<String> = ["Mercury", "Venus", "Earth", "Mars"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    group.bench_function("letter", |b| {
        b.iter(|| AnswerKeyMode::Auto.resolve(black_box("c"), black_box(&options)))
    });

    group.bench_function("text", |b| {
        b.iter(|| AnswerKeyMode::Auto.resolve(black_box("mars"), black_box(&options)))
    });

    group.bench_function("unresolved", |b| {
        b.iter(|| AnswerKeyMode::Auto.resolve(black_box("Pluto"), black_box(&options)))
    });

    group.finish();
}

fn generate_quiz_csv(n: usize) -> String {
    let mut s = String::from("question,optionA,optionB,optionC,optionD,answer\n");
    for i in 0..n {
        let answer = if i % 2 == 0 { "B".to_string() } else { format!("option {i}c") };
        s.push_str(&format!(
            "\"Question {i}, with a comma\",option {i}a,option {i}b,option {i}c,option {i}d,{answer}\n"
        ));
    }
    s
}

criterion_group!(benches, bench_csv_parsing, bench_answer_resolution);
criterion_main!(benches);
