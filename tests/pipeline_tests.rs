use imp::ast::{block, declare, int, mult, not, plus, print, seq, var};
use imp::demo::{self, counter_program, SAMPLES};
use imp::runner::RunError;
use imp::{parse, pretty, run_source, ErrorKind, RunOptions, Value};

fn run_with(source: &str, options: RunOptions) -> (Result<imp::ValueEnv, RunError>, String) {
    let mut out = Vec::new();
    let result = run_source(source, options, &mut out);
    (result, String::from_utf8(out).expect("output should be utf8"))
}

#[test]
fn pretty_prints_statements() {
    let program = parse("{x:=3;print x}").expect("program should parse");
    assert_eq!(pretty(&program), "{ x := 3; print x }");

    let program = parse("{x:=1;while x<4 {print x; x = x+1}}").expect("program should parse");
    assert_eq!(
        pretty(&program),
        "{ x := 1; while (x<4) { print x; x = (x+1) } }"
    );

    let program = parse("{if true {print 1} else {print 2}}").expect("program should parse");
    assert_eq!(pretty(&program), "{ if true { print 1 } else { print 2 } }");
}

#[test]
fn pretty_parenthesises_expressions() {
    assert_eq!(plus(int(1), mult(int(2), int(3))).to_string(), "(1+(2*3))");
    assert_eq!(not(var("x")).to_string(), "(!x)");
    let program = parse("{print a||b&&c==d}").expect("program should parse");
    assert_eq!(pretty(&program), "{ print (a||(b&&(c==d))) }");
}

#[test]
fn pretty_output_reparses_to_the_same_tree() {
    let sources = [
        "{x:=3;y:=4;z:=7}",
        "{x:=true;if x {print true} else {print false}}",
        "{x:=1;while x<4 {print x; x = x+1}}",
        "{a:=(1+2)*3; b:=!(a<4)||a==9; print b&&true}",
        "{i:=0; while i<2 {j:=0; while j<2 {print i*2+j; j = j+1}; i = i+1}}",
    ];
    for source in sources {
        let program = parse(source).expect("program should parse");
        let reparsed = parse(&pretty(&program)).expect("pretty output should parse");
        assert_eq!(reparsed, program, "{}", source);
    }
}

#[test]
fn pretty_is_total_over_hand_built_trees() {
    let program = block(seq(declare("n", not(int(4))), print(var("n"))));
    assert_eq!(pretty(&program), "{ n := (!4); print n }");
}

#[test]
fn run_source_prints_program_output() {
    let (result, out) = run_with("{x:=1;while x<4 {print x; x = x+1}}", RunOptions::default());
    let env = result.expect("program should run");
    assert_eq!(out, "1\n2\n3\n");
    assert_eq!(env.get("x"), Some(&Value::Int(4)));
}

#[test]
fn run_source_reports_parse_offset() {
    let (result, out) = run_with("{x:=3;varY:==4}", RunOptions::default());
    match result {
        Err(RunError::Syntax(error)) => {
            assert_eq!(error.kind, ErrorKind::ParseError);
            assert_eq!(error.offset(), 13);
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }
    assert_eq!(out, "");
}

#[test]
fn run_source_reports_type_errors_before_running() {
    let (result, out) = run_with("{print 1; x=4; print x}", RunOptions::default());
    match result {
        Err(RunError::Type(error)) => assert_eq!(error.culprit, "x = 4"),
        other => panic!("expected a type error, got {:?}", other),
    }
    assert_eq!(out, "");
}

#[test]
fn check_only_skips_evaluation() {
    let options = RunOptions {
        check_only: true,
        ..RunOptions::default()
    };
    let (result, out) = run_with("{x:=3; print x}", options);
    assert!(result.expect("program should check").is_empty());
    assert_eq!(out, "");
}

#[test]
fn pretty_option_echoes_the_program() {
    let options = RunOptions {
        pretty: true,
        ..RunOptions::default()
    };
    let (result, out) = run_with("{x:=3;print x*2}", options);
    assert!(result.is_ok());
    assert_eq!(out, "{ x := 3; print (x*2) }\n6\n");
}

#[test]
fn tokens_option_dumps_the_token_stream() {
    let options = RunOptions {
        tokens: true,
        check_only: true,
        ..RunOptions::default()
    };
    let (result, out) = run_with("{x:=3}", options);
    assert!(result.is_ok());
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "   0..1    '{'");
    assert_eq!(lines[2], "   2..4    ':='");
    assert_eq!(lines[5], "   6..6    end of input");
}

#[test]
fn tokens_option_surfaces_lex_errors() {
    let options = RunOptions {
        tokens: true,
        ..RunOptions::default()
    };
    let (result, _) = run_with("{x:3}", options);
    match result {
        Err(RunError::Syntax(error)) => assert_eq!(error.kind, ErrorKind::LexError),
        other => panic!("expected a lex error, got {:?}", other),
    }
}

#[test]
fn counter_program_output() {
    let mut env = imp::ValueEnv::new();
    let mut out = Vec::new();
    imp::eval(&counter_program(), &mut env, &mut out).expect("writing to a Vec cannot fail");
    assert_eq!(String::from_utf8(out).expect("utf8"), "3\n6\n6\n7\n8\n9\n10\n");
    assert_eq!(env.get("counter"), Some(&Value::Int(13)));
}

#[test]
fn demo_samples_report_each_stage() {
    let mut out = Vec::new();
    demo::run_all(&mut out).expect("writing to a Vec cannot fail");
    let report = String::from_utf8(out).expect("utf8");

    assert!(report.contains("Check: ok"));
    assert!(report.contains("Parse: failed at character 5"));
    assert!(report.contains("Check: failed: ill-typed print statement: IllTyped Addition"));
    assert!(report.contains("  at: print (x+y)"));
    let headers = report.lines().filter(|line| line.starts_with("== ")).count();
    assert_eq!(headers, SAMPLES.len() + 1);
}

#[test]
fn demo_single_sample() {
    let sample = SAMPLES
        .iter()
        .find(|sample| sample.name == "counting loop")
        .expect("sample should exist");
    let mut out = Vec::new();
    demo::run_sample(sample, &mut out).expect("writing to a Vec cannot fail");
    let report = String::from_utf8(out).expect("utf8");
    assert!(report.ends_with("Check: ok\nOutput:\n1\n2\n3\n"));
}

#[test]
fn very_long_programs_run_and_print_without_deep_recursion() {
    let statements = 100_000;
    let mut source = String::from("{x:=0");
    for _ in 0..statements {
        source.push_str(";x=x+1");
    }
    source.push('}');

    let options = RunOptions {
        pretty: true,
        ..RunOptions::default()
    };
    let (result, out) = run_with(&source, options);
    let env = result.expect("program should run");
    assert_eq!(env.get("x"), Some(&Value::Int(statements)));
    assert!(out.starts_with("{ x := 0; x = (x+1); x = (x+1);"));
    assert!(out.ends_with("; x = (x+1) }\n"));
    assert_eq!(out.matches("x = (x+1)").count(), statements as usize);

    let program = parse(&source).expect("program should parse");
    let text = pretty(&program);
    drop(program);
    let reparsed = parse(&text).expect("pretty output should parse");
    assert_eq!(pretty(&reparsed), text);
}
