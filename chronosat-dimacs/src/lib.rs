//! DIMACS CNF reader and writer for the chronosat SAT solver.
//!
//! The reader is line oriented: comment lines start with `c`, a single
//! `p cnf <vars> <clauses>` line precedes all clause lines, each clause is a
//! line of signed nonzero integers terminated by `0`, and a line starting
//! with `%` ends the input early. Lines are limited to 120 characters.

use std::io;

use chronosat_formula::{CnfFormula, Lit, Var};

use anyhow::Error;
use thiserror::Error;

/// Longest allowed input line, excluding the line terminator.
pub const MAX_LINE_LEN: usize = 120;

/// Possible errors while reading a DIMACS CNF formula.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("line {line}: line is longer than 120 characters")]
    LineTooLong { line: usize },
    #[error("line {line}: invalid problem line: '{header}'")]
    InvalidHeader { line: usize, header: String },
    #[error("line {line}: duplicate problem line")]
    DuplicateHeader { line: usize },
    #[error("line {line}: clause before the problem line")]
    ClauseBeforeHeader { line: usize },
    #[error("line {line}: expected a literal, found '{token}'")]
    UnexpectedToken { line: usize, token: String },
    #[error("line {line}: literal {value} is out of range")]
    LiteralTooLarge { line: usize, value: isize },
    #[error("line {line}: clause is not terminated by 0")]
    UnterminatedClause { line: usize },
    #[error("input contains no problem line")]
    MissingHeader,
    #[error("input has {clause_count} clauses while the problem line declares {header_clause_count}")]
    ClauseCount {
        clause_count: usize,
        header_clause_count: usize,
    },
}

/// Variable and clause count declared by a DIMACS CNF problem line.
#[derive(Copy, Clone, Debug)]
pub struct DimacsHeader {
    pub var_count: usize,
    pub clause_count: usize,
}

/// Read a DIMACS CNF formula.
///
/// Checks the problem line against the parsed input: the number of clauses
/// must match the declared count, and every literal must stay within the
/// supported variable range.
pub fn parse_dimacs(input: impl io::Read) -> Result<CnfFormula, Error> {
    use io::BufRead;

    let mut formula = CnfFormula::new();
    let mut header: Option<DimacsHeader> = None;
    let mut clause_count = 0;
    let mut clause_lits = Vec::new();

    let reader = io::BufReader::new(input);

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;

        if line.len() > MAX_LINE_LEN {
            return Err(ParserError::LineTooLong { line: line_number }.into());
        }

        if line.starts_with('c') || line.trim().is_empty() {
            continue;
        }
        if line.starts_with('%') {
            break;
        }
        if line.starts_with('p') {
            if header.is_some() {
                return Err(ParserError::DuplicateHeader { line: line_number }.into());
            }
            let parsed = parse_header(line_number, &line)?;
            formula.set_var_count(parsed.var_count);
            header = Some(parsed);
            continue;
        }

        if header.is_none() {
            return Err(ParserError::ClauseBeforeHeader { line: line_number }.into());
        }

        parse_clause(line_number, &line, &mut clause_lits)?;
        formula.add_clause(&clause_lits);
        clause_count += 1;
    }

    let header = header.ok_or(ParserError::MissingHeader)?;

    if clause_count != header.clause_count {
        return Err(ParserError::ClauseCount {
            clause_count,
            header_clause_count: header.clause_count,
        }
        .into());
    }

    Ok(formula)
}

fn parse_header(line_number: usize, line: &str) -> Result<DimacsHeader, ParserError> {
    let invalid = || ParserError::InvalidHeader {
        line: line_number,
        header: line.to_owned(),
    };

    let mut fields = line.split_whitespace();

    if fields.next() != Some("p") || fields.next() != Some("cnf") {
        return Err(invalid());
    }

    let var_count: usize = fields
        .next()
        .and_then(|field| field.parse().ok())
        .ok_or_else(invalid)?;

    if var_count > Var::max_count() {
        return Err(ParserError::LiteralTooLarge {
            line: line_number,
            value: var_count as isize,
        });
    }

    let clause_count: usize = fields
        .next()
        .and_then(|field| field.parse().ok())
        .ok_or_else(invalid)?;

    if fields.next().is_some() {
        return Err(invalid());
    }

    Ok(DimacsHeader {
        var_count,
        clause_count,
    })
}

/// Parse one clause line into `lits`.
///
/// Tokens after the terminating `0` are ignored, matching the common loose
/// handling of benchmark files.
fn parse_clause(line_number: usize, line: &str, lits: &mut Vec<Lit>) -> Result<(), ParserError> {
    lits.clear();

    for token in line.split_whitespace() {
        let value: isize = token.parse().map_err(|_| ParserError::UnexpectedToken {
            line: line_number,
            token: token.to_owned(),
        })?;

        if value == 0 {
            return Ok(());
        }

        if value.unsigned_abs() > Var::max_count() {
            return Err(ParserError::LiteralTooLarge {
                line: line_number,
                value,
            });
        }

        lits.push(Lit::from_dimacs(value));
    }

    Err(ParserError::UnterminatedClause { line: line_number })
}

/// Write a formula as DIMACS CNF.
///
/// Emits the problem line followed by one clause line per clause, in the
/// same dialect the reader accepts. Each clause line is assembled in a
/// scratch buffer first; a clause whose line would exceed the 120 character
/// limit cannot be represented and is reported as `InvalidInput`.
pub fn write_dimacs(target: &mut impl io::Write, formula: &CnfFormula) -> io::Result<()> {
    writeln!(target, "p cnf {} {}", formula.var_count(), formula.len())?;

    let mut line = Vec::with_capacity(MAX_LINE_LEN + 1);
    for clause in formula.iter() {
        line.clear();
        for &lit in clause {
            itoa::write(&mut line, lit.to_dimacs())?;
            line.push(b' ');
        }
        line.push(b'0');

        if line.len() > MAX_LINE_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "clause does not fit a 120 character line",
            ));
        }

        line.push(b'\n');
        target.write_all(&line)?;
    }

    Ok(())
}
