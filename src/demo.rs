//! Built-in sample programs, shown by `imp --demo`.

use crate::ast::{
    assign, block, declare, if_else, int, less, plus, print, seq, var, while_loop, Block,
};
use crate::checker::TypeChecker;
use crate::evaluator::Evaluator;
use crate::parser;
use std::io::{self, Write};

/// A named sample program.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub name: &'static str,
    pub source: &'static str,
}

const fn sample(name: &'static str, source: &'static str) -> Sample {
    Sample { name, source }
}

/// One well-formed and one broken program per language feature.
pub const SAMPLES: &[Sample] = &[
    sample("declaration", "{x:=3}"),
    sample("malformed declaration", "{x:==3}"),
    sample("sequence of two", "{x:=3;y:=4}"),
    sample("sequence of three", "{x:=3;y:=4;z:=7}"),
    sample("empty statement in sequence", "{x:=3;y:=4;;z:=7}"),
    sample("print", "{print false; print true}"),
    sample("print of undeclared name", "{print fasle; print true}"),
    sample("assignment", "{x:=3;print x; x=4; print x}"),
    sample("assignment before declaration", "{x=4; print x}"),
    sample("addition", "{x:=3;y:=4;print x+y}"),
    sample("addition of bool and int", "{x:=true;y:=4;print x+y}"),
    sample("multiplication", "{x:=3;y:=4;print x*y}"),
    sample("multiplication of bool and int", "{x:=true;y:=4;print x*y}"),
    sample("less than", "{x:=3;y:=4;print x<y}"),
    sample("less than of bool and int", "{x:=true;y:=4;print x<y}"),
    sample("conjunction", "{x:=true;y:=true;print x&&y}"),
    sample("conjunction with false", "{x:=false;y:=true;print x&&y}"),
    sample("conjunction of bool and int", "{x:=true;y:=4;print x&&y}"),
    sample("disjunction", "{x:=true;y:=false;print x||y}"),
    sample("disjunction of falses", "{x:=false;y:=false;print x||y}"),
    sample("disjunction of bool and int", "{x:=true;y:=4;print x||y}"),
    sample("equality of bools", "{x:=true;y:=false;print x==y}"),
    sample("equality of equal bools", "{x:=false;y:=false;print x==y}"),
    sample("equality of equal ints", "{x:=1;y:=1;print x==y}"),
    sample("equality of ints", "{x:=1;y:=2;print x==y}"),
    sample("equality of bool and int", "{x:=true;y:=4;print x==y}"),
    sample("negation of true", "{x:=true;print !x}"),
    sample("negation of false", "{x:=false;print !x}"),
    sample("negation of int", "{x:=1;print !x}"),
    sample("if on true", "{x:=true;if x {print true} else {print false}}"),
    sample("if on false", "{x:=false;if x {print true} else {print false}}"),
    sample("if on equality", "{x:=1;if x == 1 {print true} else {print false}}"),
    sample("if on int", "{x:=1;if x {print true} else {print false}}"),
    sample("counting loop", "{x:=1;while x<4 {print x; x = x+1}}"),
    sample("loop on a flag", "{x:=true;while x {print x; x = false}}"),
    sample("loop on int", "{x:=1;while x {print x}}"),
];

/// Hand-built program: print a counter, bump it by three, then count it up
/// to 13, printing only while it is below 11.
pub fn counter_program() -> Block {
    let counter = || var("counter");
    let increment = || assign("counter", plus(counter(), int(1)));

    block(seq(
        seq(
            seq(declare("counter", int(3)), print(counter())),
            seq(
                assign("counter", plus(counter(), int(3))),
                print(counter()),
            ),
        ),
        while_loop(
            less(counter(), int(13)),
            block(if_else(
                less(counter(), int(11)),
                block(seq(print(counter()), increment())),
                block(increment()),
            )),
        ),
    ))
}

/// Check and run a program against fresh environments, reporting each stage
/// as plain text on `out`.
pub fn run_program<W: Write>(program: &Block, out: &mut W) -> io::Result<()> {
    writeln!(out, "Program: {}", program)?;

    let mut checker = TypeChecker::new();
    if let Err(error) = checker.check(program) {
        writeln!(out, "Check: failed: {}", error)?;
        writeln!(out, "  at: {}", error.culprit)?;
        return Ok(());
    }
    writeln!(out, "Check: ok")?;

    writeln!(out, "Output:")?;
    let mut evaluator = Evaluator::with_output(&mut *out);
    evaluator.execute(program)?;
    Ok(())
}

/// Parse, check and run one sample.
pub fn run_sample<W: Write>(sample: &Sample, out: &mut W) -> io::Result<()> {
    writeln!(out, "== {}", sample.name)?;
    writeln!(out, "Input: {}", sample.source)?;
    match parser::parse(sample.source) {
        Ok(program) => run_program(&program, out),
        Err(error) => writeln!(
            out,
            "Parse: failed at character {}: {}",
            error.offset(),
            error.message
        ),
    }
}

/// Run the hand-built program and every sample.
pub fn run_all<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "== hand-built counter")?;
    run_program(&counter_program(), out)?;
    for sample in SAMPLES {
        writeln!(out)?;
        run_sample(sample, out)?;
    }
    Ok(())
}
