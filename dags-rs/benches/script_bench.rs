use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dags::script::tokenize;
use dags::Interpreter;

fn make_script(repeats: usize) -> String {
    let chunk = "@if @lt(@get(hp),10) @then @write(\"You feel weak. \") @else @addto(hp,-1) @endif ";
    chunk.repeat(repeats)
}

fn bench_tokenize(c: &mut Criterion) {
    let small = make_script(10);
    let large = make_script(1000);

    let mut g = c.benchmark_group("tokenize");
    g.bench_function("small", |b| b.iter(|| tokenize(black_box(&small))));
    g.bench_function("large", |b| b.iter(|| tokenize(black_box(&large))));
    g.finish();
}

fn bench_run(c: &mut Criterion) {
    let mut g = c.benchmark_group("run_script");

    g.bench_function("for_loop_100", |b| {
        let mut interp = Interpreter::new();
        b.iter(|| {
            let mut out = String::new();
            interp.run_script(black_box("@set(sum,0) @for(i,1,100) @addto(sum,$i) @endfor @get(sum)"), &mut out);
            out
        })
    });

    g.bench_function("user_function_calls", |b| {
        let mut interp = Interpreter::new();
        let mut setup = String::new();
        interp.run_script("@set(\"@sq(n)\",\"@mul($n,$n)\")", &mut setup);
        b.iter(|| {
            let mut out = String::new();
            interp.run_script(black_box("@for(i,1,20) @write(@sq($i)) @endfor"), &mut out);
            out
        })
    });

    g.bench_function("golabel_loop_1000", |b| {
        let mut interp = Interpreter::new();
        b.iter(|| {
            let mut out = String::new();
            interp.run_script(
                black_box("@set(n,0) @label(top) @addto(n,1) @if @lt(@get(n),1000) @then @golabel(top) @endif"),
                &mut out,
            );
            out
        })
    });

    g.finish();
}

criterion_group!(benches, bench_tokenize, bench_run);
criterion_main!(benches);
