use claim_validator::app::services::orchestrator::SpooledSource;
use claim_validator::app::services::record_parser::{classify, parse_detail};
use claim_validator::{ClaimFileValidator, ValidatorConfig};
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use csv::StringRecord;

const HEADER: &str = "HEAD\t1.0\tBasicProfile\tMSG-BENCH\t2024-03-01T10:00:00Z\tPADPIDA2014120301U\tBench DSP\tPADPIDA2017051201Z\tBench Society";
const DETAIL: &str = "CD01\tCLM-0\tSR-0\tUSRC17607839\tT-034.524.680-1\tBench Work\tJane Doe|John Roe\texample::jd1|example::jr2\tBench Publishing\tPADPIDA2015000001A\t50\t25\t43.75\t0.15\t0.05\t0.20\tRatePerStream\t0.004\t1200";

/// Claim file with `summaries` summaries of `details_per_summary` details each
fn bench_file(summaries: usize, details_per_summary: usize) -> String {
    let mut lines = vec![HEADER.to_string()];
    let total = format!("{:.2}", details_per_summary as f64 * 0.20);

    for s in 0..summaries {
        lines.push(format!(
            "SY02\tSR-{}\tBenchPremium\tSubscriptionModel\tOnDemandStream\tUS\t2024-01\t2024-01\tOwned\tUSD\t\t\t75\t25\t{}",
            s, total
        ));
        for d in 0..details_per_summary {
            lines.push(format!(
                "CD01\tCLM-{}-{}\tSR-{}\tUSRC17607839\tT-034.524.680-1\tBench Work\tJane Doe|John Roe\texample::jd1|example::jr2\tBench Publishing\tPADPIDA2015000001A\t50\t25\t43.75\t0.15\t0.05\t0.20\tRatePerStream\t0.004\t1200",
                s, d, s
            ));
        }
    }

    let line_count = lines.len() + 1;
    lines.push(format!("FOOT\t{}\t{}", line_count, summaries));
    lines.join("\n")
}

fn parse_bench(c: &mut Criterion) {
    let fields: Vec<&str> = DETAIL.split('\t').collect();
    let record = StringRecord::from(fields);

    c.bench_function("classify_and_parse_detail", |b| {
        b.iter(|| {
            black_box(classify(black_box(&record)));
            black_box(parse_detail(black_box(&record), 2));
        });
    });
}

fn validation_bench(c: &mut Criterion) {
    let content = bench_file(100, 500);
    let source = SpooledSource::from_reader(content.as_bytes(), "bench").expect("spool bench file");
    let validator = ClaimFileValidator::new(ValidatorConfig::default());

    let mut group = c.benchmark_group("validate");
    group.throughput(Throughput::Bytes(content.len() as u64));
    group.sample_size(10);
    group.bench_function("two_pass_50k_details", |b| {
        b.iter(|| {
            let result = validator.validate(&source).expect("validation runs");
            black_box(result);
        });
    });
    group.finish();
}

criterion_group!(validation_benches, parse_bench, validation_bench);
criterion_main!(validation_benches);
