//! Invocation parsing tests

use containerledger::protocol::{Function, Invocation};
use containerledger::LedgerError;

#[test]
fn test_every_function_name_parses_back() {
    for function in Function::ALL {
        assert_eq!(function.name().parse::<Function>().unwrap(), function);
    }
}

#[test]
fn test_parse_with_correct_arity() {
    let invocation = Invocation::parse("CreateOrUpdateContainer", &["u1", "c1"]).unwrap();

    assert_eq!(invocation.function, Function::CreateOrUpdateContainer);
    assert_eq!(invocation.arg(0), "u1");
    assert_eq!(invocation.arg(1), "c1");
}

#[test]
fn test_parse_no_arg_function() {
    let no_args: [&str; 0] = [];
    let invocation = Invocation::parse("GetAllContainers", &no_args).unwrap();

    assert!(invocation.args.is_empty());
}

#[test]
fn test_unknown_function_rejected() {
    let err = Invocation::parse("TransferContainer", &["u1"]).unwrap_err();

    assert!(matches!(err, LedgerError::Protocol(_)));
    assert!(err.to_string().contains("TransferContainer"));
}

#[test]
fn test_function_names_are_case_sensitive() {
    assert!("readcontainer".parse::<Function>().is_err());
}

#[test]
fn test_wrong_arity_rejected() {
    let err = Invocation::parse("ReadContainer", &["u1", "extra"]).unwrap_err();
    assert!(matches!(err, LedgerError::Protocol(_)));

    let err = Invocation::parse("CreateOrUpdateContainer", &["only-uid"]).unwrap_err();
    assert!(matches!(err, LedgerError::Protocol(_)));
}

#[test]
fn test_write_functions() {
    let writes: Vec<_> = Function::ALL.into_iter().filter(|f| f.is_write()).collect();
    assert_eq!(
        writes,
        vec![Function::CreateOrUpdateContainer, Function::DeleteContainer]
    );
}
