use condlint::lint::{lint_file, LintConfig, Severity};
use condlint::{parse, Condition, Location};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), condlint::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/proxies/orders.xml".to_owned());

    let findings = lint_file(&path, &LintConfig::default())?;
    for finding in &findings {
        println!("{path}:{finding}");
    }
    let errors = findings
        .iter()
        .filter(|f| f.severity() == Severity::Error)
        .count();
    println!("{} findings, {errors} errors", findings.len());

    let cond = Condition::new(
        r#"request.verb = "GET" or request.verb != "GET""#,
        Location::new(1, 1),
    );
    if let Ok(summary) = cond.classification() {
        println!("{cond}: {summary}");
    }

    let expr = parse(r#"proxy.pathsuffix ~/ "/orders/**" and not flag"#)?;
    println!("{expr}");
    Ok(())
}
