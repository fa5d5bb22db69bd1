//! Conversion between Python values and formulas/matches.
//!
//! Decoding is all-or-nothing: the first invalid element aborts the whole
//! conversion and everything decoded so far is dropped.

use pyo3::prelude::*;
use pyo3::types::{PyBool, PyByteArray, PyBytes, PyInt, PyList, PySequence, PyString};
use snafu::{OptionExt, ResultExt};

use tinysat_core::cnf::{Clause, Formula};
use tinysat_core::lit::Lit;
use tinysat_core::model::Match;
use tinysat_core::value::Value;

use crate::error::*;

fn type_name(value: &Bound<'_, PyAny>) -> String {
    value
        .get_type()
        .name()
        .map(|name| name.to_string())
        .unwrap_or_else(|_| "<unknown>".to_string())
}

fn mismatch<T>(value: &Bound<'_, PyAny>, path: String, expected: &str) -> Result<T> {
    ConversionSnafu {
        path,
        message: format!("expected {}, got {}", expected, type_name(value)),
    }
    .fail()
}

/// Text and byte strings are sequences too, but never a list of clauses or values.
fn sequence<'a, 'py>(
    value: &'a Bound<'py, PyAny>,
    path: impl FnOnce() -> String,
) -> Result<&'a Bound<'py, PySequence>> {
    let is_text = value.is_instance_of::<PyString>()
        || value.is_instance_of::<PyBytes>()
        || value.is_instance_of::<PyByteArray>();
    match value.downcast::<PySequence>() {
        Ok(seq) if !is_text => Ok(seq),
        _ => mismatch(value, path(), "sequence"),
    }
}

fn reserve<T>(what: &'static str, len: usize) -> Result<Vec<T>> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(len).context(AllocationSnafu { what, len })?;
    Ok(vec)
}

fn decode_lit(value: &Bound<'_, PyAny>, path: impl Fn() -> String) -> Result<Lit> {
    // `bool` is a subclass of `int`, but `True` is not a literal.
    if value.is_instance_of::<PyBool>() || !value.is_instance_of::<PyInt>() {
        return mismatch(value, path(), "int");
    }
    let raw: i32 = value.extract().map_err(|_| {
        ConversionSnafu {
            path: path(),
            message: format!("literal {} does not fit into a 32-bit integer", value),
        }
        .build()
    })?;
    Lit::try_new(raw).with_context(|| ConversionSnafu {
        path: path(),
        message: format!("literal must be nonzero and negatable, got {}", raw),
    })
}

fn decode_clause(value: &Bound<'_, PyAny>, index: usize) -> Result<Clause> {
    let seq = sequence(value, || format!("formula[{}]", index))?;
    let len = seq.len()?;
    let mut lits = reserve("literals", len)?;
    for i in 0..len {
        let item = seq.get_item(i)?;
        lits.push(decode_lit(&item, || format!("formula[{}][{}]", index, i))?);
    }
    Ok(Clause::new(lits))
}

/// Decode `list[list[int]]` (any nested sequences of ints) into a formula.
pub fn decode_formula(value: &Bound<'_, PyAny>) -> Result<Formula> {
    let seq = sequence(value, || "formula".to_string())?;
    let len = seq.len()?;
    let mut clauses = reserve("clauses", len)?;
    for i in 0..len {
        let item = seq.get_item(i)?;
        clauses.push(decode_clause(&item, i)?);
    }
    Ok(Formula::from_clauses(clauses))
}

/// Decode a sequence of `True`/`False`/`None` into a match; `None` is unassigned.
pub fn decode_match(value: &Bound<'_, PyAny>) -> Result<Match> {
    let seq = sequence(value, || "match".to_string())?;
    let len = seq.len()?;
    let mut values = reserve("values", len)?;
    for i in 0..len {
        let item = seq.get_item(i)?;
        let value = if item.is_none() {
            Value::Unassigned
        } else if let Ok(b) = item.downcast::<PyBool>() {
            Value::from(b.is_true())
        } else {
            return mismatch(&item, format!("match[{}]", i), "bool or None");
        };
        values.push(value);
    }
    Ok(Match::from_values(values))
}

pub fn encode_clause<'py>(py: Python<'py>, clause: &Clause) -> Result<Bound<'py, PyList>> {
    Ok(PyList::new(py, clause.iter().map(|&lit| lit.get()))?)
}

pub fn encode_formula<'py>(py: Python<'py>, formula: &Formula) -> Result<Bound<'py, PyList>> {
    let list = PyList::empty(py);
    for clause in formula {
        list.append(encode_clause(py, clause)?)?;
    }
    Ok(list)
}

pub fn encode_match<'py>(py: Python<'py>, assignment: &Match) -> Result<Bound<'py, PyList>> {
    Ok(PyList::new(py, assignment.iter().map(|value| value.as_bool()))?)
}
