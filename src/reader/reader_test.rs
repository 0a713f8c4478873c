use super::*;
use crate::data::{Object, Pair, Storage, StorageStats};

fn numbers(list: Ptr) -> Vec<i32> {
    list.iter()
        .map(|p| match p.get() {
            Object::Integer(i) => i,
            v => panic!("unexpected object: {v:?}"),
        })
        .collect()
}

fn error_message(state: ParseState) -> String {
    assert_eq!(state.rest, "", "errors leave no remainder");
    match state.value.get() {
        Object::Error(message) => message.to_string(),
        v => panic!("expected an error, got: {v}"),
    }
}

#[test]
fn read_number() -> ReadResult<()> {
    let store = Storage::default();
    let (v, rest) = read_expr(&store, "  42 rest")?;
    assert_eq!(v.get().as_integer(), Some(42));
    assert_eq!(rest, " rest");
    Ok(())
}

#[test]
fn read_symbol() -> ReadResult<()> {
    let store = Storage::default();
    let (v, rest) = read_expr(&store, "tree->list)")?;
    assert_eq!(v.get().as_symbol().unwrap().name(), "tree->list");
    assert_eq!(rest, ")");
    Ok(())
}

#[test]
fn symbols_are_interned() -> ReadResult<()> {
    let store = Storage::default();
    let (a, _) = read_expr(&store, "foo")?;
    let (b, _) = read_expr(&store, "(foo)")?;
    assert_eq!(a, b.safe_head());
    assert_eq!(store.current_stats().symbols, 1);
    Ok(())
}

#[test]
fn sessions_do_not_share_symbols() {
    let one = Storage::default();
    let two = Storage::default();
    let a = read(&one, "foo").value;
    let b = read(&two, "foo").value;
    assert_ne!(a, b);
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn empty_list_is_nil() -> ReadResult<()> {
    let store = Storage::default();
    let (v, _) = read_expr(&store, "()")?;
    assert!(v.is_nil());
    assert_eq!(v.to_string(), "nil");
    let (v, _) = read_expr(&store, "( \t )")?;
    assert!(v.is_nil());
    Ok(())
}

#[test]
fn nil_symbol_is_nil() -> ReadResult<()> {
    let store = Storage::default();
    let (v, _) = read_expr(&store, "nil")?;
    assert_eq!(v, Ptr::nil());
    // The alias is not interned.
    assert_eq!(store.current_stats().symbols, 0);
    // ...but other spellings are distinct symbols.
    let (v, _) = read_expr(&store, "NIL")?;
    assert!(v.is_symbol());
    Ok(())
}

#[test]
fn list_keeps_order() -> ReadResult<()> {
    let store = Storage::default();
    let (v, rest) = read_expr(&store, "(1 2 3) 4")?;
    assert_eq!(numbers(v), vec![1, 2, 3]);
    assert_eq!(rest, " 4");
    let [_, _, _]: [Ptr; 3] = v.try_into().expect("a proper 3-element list");
    Ok(())
}

#[test]
fn list_allocates_no_extra_pairs() -> ReadResult<()> {
    let store = Storage::default();
    let _ = read_expr(&store, "(1 2 3)")?;
    // Three integers, three pairs: reversal reuses the accumulated pairs.
    assert_eq!(
        store.current_stats(),
        StorageStats {
            objects: 6,
            symbols: 0
        }
    );
    Ok(())
}

#[test]
fn nested_lists() -> ReadResult<()> {
    let store = Storage::default();
    let (v, _) = read_expr(&store, "(a (b (c)) () d)")?;
    assert_eq!(v.to_string(), "(a (b (c)) nil d)");
    let [a, inner, empty, d]: [Ptr; 4] = v.try_into().unwrap();
    assert!(a.is_symbol());
    assert!(empty.is_nil());
    assert!(d.is_symbol());
    assert_eq!(inner.to_string(), "(b (c))");
    Ok(())
}

#[test]
fn quote_is_shorthand() -> ReadResult<()> {
    let store = Storage::default();
    let (quoted, _) = read_expr(&store, "'a")?;
    let (long, _) = read_expr(&store, "(quote a)")?;
    assert!(quoted.equal(long));
    assert_eq!(quoted.to_string(), "(quote a)");

    let [q, a]: [Ptr; 2] = quoted.try_into().unwrap();
    assert_eq!(q, store.make_symbol("quote"));
    assert_eq!(a, store.make_symbol("a"));
    Ok(())
}

#[test]
fn quote_nests() -> ReadResult<()> {
    let store = Storage::default();
    let (v, rest) = read_expr(&store, "''(1 'b) c")?;
    assert_eq!(v.to_string(), "(quote (quote (1 (quote b))))");
    assert_eq!(rest, " c");
    Ok(())
}

#[test]
fn quote_remainder_follows_inner_value() -> ReadResult<()> {
    let store = Storage::default();
    let (_, rest) = read_expr(&store, "' x)")?;
    assert_eq!(rest, ")");
    Ok(())
}

#[test]
fn empty_input() {
    let store = Storage::default();
    for input in ["", " ", " \t\r\n "] {
        assert_eq!(read_expr(&store, input), Err(ReadErr::EmptyInput));
        assert_eq!(error_message(read(&store, input)), "empty input");
    }
}

#[test]
fn unexpected_close() {
    let store = Storage::default();
    assert_eq!(error_message(read(&store, ")")), "invalid syntax: )");
    assert_eq!(
        error_message(read(&store, "  ) (a b)")),
        "invalid syntax: ) (a b)"
    );
    // After a quote, a close paren is still unexpected.
    assert_eq!(error_message(read(&store, "(a ' )")), "invalid syntax: )");
}

#[test]
fn unfinished_list() {
    let store = Storage::default();
    for input in ["(", "(1 2", "((a) b", "(a (b)"] {
        let err = read_expr(&store, input).unwrap_err();
        assert_eq!(err, ReadErr::UnfinishedList);
        assert!(err.is_incomplete());
        assert_eq!(error_message(read(&store, input)), "unfinished parenthesis");
    }
}

#[test]
fn quote_at_end_is_empty_input() {
    let store = Storage::default();
    // The quote reads the next expression on its own, so running out of input
    // is an empty read even inside a list.
    assert_eq!(read_expr(&store, "'"), Err(ReadErr::EmptyInput));
    assert_eq!(read_expr(&store, "('"), Err(ReadErr::EmptyInput));
    assert_eq!(read_expr(&store, "(a '  "), Err(ReadErr::EmptyInput));
}

#[test]
fn error_replaces_enclosing_list() {
    let store = Storage::default();
    let state = read(&store, "(1 (2 ')) 3");
    assert_eq!(error_message(state), "invalid syntax: )) 3");
}

#[test]
fn no_dotted_input() -> ReadResult<()> {
    let store = Storage::default();
    let (v, _) = read_expr(&store, "(1 . 2)")?;
    let [one, dot, two]: [Ptr; 3] = v.try_into().unwrap();
    assert_eq!(one.get().as_integer(), Some(1));
    assert_eq!(dot.get().as_symbol().unwrap().name(), ".");
    assert_eq!(two.get().as_integer(), Some(2));
    Ok(())
}

#[test]
fn out_of_range_numbers_are_symbols() -> ReadResult<()> {
    let store = Storage::default();
    for input in ["99999999999", "2147483648", "-2147483649", "1.5", "+", "-", "12ab"] {
        let (v, _) = read_expr(&store, input)?;
        assert!(v.is_symbol(), "{input:?} should read as a symbol");
        assert_eq!(v.to_string(), input);
    }
    let (v, _) = read_expr(&store, "-2147483648")?;
    assert_eq!(v.get().as_integer(), Some(i32::MIN));
    let (v, _) = read_expr(&store, "+7")?;
    assert_eq!(v.get().as_integer(), Some(7));
    Ok(())
}

#[test]
fn atoms_split_at_delimiters() -> ReadResult<()> {
    let store = Storage::default();
    let (v, _) = read_expr(&store, "(a'b(c)d)")?;
    assert_eq!(v.to_string(), "(a (quote b) (c) d)");
    Ok(())
}

#[test]
fn roundtrip() -> ReadResult<()> {
    let store = Storage::default();
    for input in [
        "1",
        "-12",
        "sym",
        "()",
        "(1 2 3)",
        "(a (b (c d)) e)",
        "'(x 'y)",
        "(() (()) nil)",
        "(1 . 2)",
    ] {
        let (v, _) = read_expr(&store, input)?;
        let printed = v.to_string();
        let (again, rest) = read_expr(&store, &printed)?;
        assert!(again.equal(v), "{input:?} printed as {printed:?}");
        assert_eq!(rest, "");
        assert_eq!(again.to_string(), printed);
    }
    Ok(())
}

#[test]
fn deep_nesting() -> ReadResult<()> {
    let store = Storage::default();
    let depth = 100_000;
    let input = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    let (mut v, rest) = read_expr(&store, &input)?;
    assert_eq!(rest, "");
    for _ in 0..depth {
        let Some(Pair { car, cdr }) = v.get().as_pair() else {
            panic!("unexpected object: {:?}", v.get());
        };
        assert!(cdr.is_nil());
        v = car;
    }
    assert_eq!(v, store.make_symbol("x"));

    let quotes = format!("{}y", "'".repeat(depth));
    let (v, _) = read_expr(&store, &quotes)?;
    assert!(v.is_pair());
    Ok(())
}

#[test]
fn read_body_reads_everything() -> ReadResult<()> {
    let store = Storage::default();
    let body = read_body(&store, " 1 (a b)\n'c  ")?;
    assert_eq!(body.to_string(), "(1 (a b) (quote c))");
    assert!(read_body(&store, "  \n")?.is_nil());
    assert_eq!(read_body(&store, "1 (2"), Err(ReadErr::UnfinishedList));
    Ok(())
}

#[test]
fn read_err_into_io_error() {
    let err: std::io::Error = ReadErr::UnfinishedList.into();
    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    let err: std::io::Error = ReadErr::UnexpectedClose(")".to_owned()).into();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    assert_eq!(err.to_string(), "invalid syntax: )");
}
