//! Regex functions. Every pattern goes through the shared [`RegexCache`].

use std::sync::Arc;

use serde_json::Value;
use txt_ingest::RegexCache;

use crate::error::FuncError;
use crate::registry::{str_arg, Arity, Registry};

/// Registers `match`, `find`, `replace` and `split`.
pub fn register(registry: &mut Registry, cache: &Arc<RegexCache>) {
    let c = Arc::clone(cache);
    registry.register(
        "match",
        Arity::exactly(2),
        move |args: &[Value]| -> Result<Value, FuncError> {
            let re = c.compile(str_arg("match", args, 0)?)?;
            Ok(Value::Bool(re.is_match(str_arg("match", args, 1)?)))
        },
    );

    let c = Arc::clone(cache);
    registry.register(
        "find",
        Arity::exactly(2),
        move |args: &[Value]| -> Result<Value, FuncError> {
            let re = c.compile(str_arg("find", args, 0)?)?;
            let s = str_arg("find", args, 1)?;
            Ok(Value::Array(
                re.find_iter(s)
                    .map(|m| Value::String(m.as_str().to_string()))
                    .collect(),
            ))
        },
    );

    let c = Arc::clone(cache);
    registry.register(
        "replace",
        Arity::exactly(3),
        move |args: &[Value]| -> Result<Value, FuncError> {
            let re = c.compile(str_arg("replace", args, 0)?)?;
            let replacement = str_arg("replace", args, 1)?;
            let s = str_arg("replace", args, 2)?;
            Ok(re.replace_all(s, replacement).into_owned().into())
        },
    );

    let c = Arc::clone(cache);
    registry.register(
        "split",
        Arity::exactly(2),
        move |args: &[Value]| -> Result<Value, FuncError> {
            let re = c.compile(str_arg("split", args, 0)?)?;
            let s = str_arg("split", args, 1)?;
            Ok(Value::Array(
                re.split(s).map(|p| Value::String(p.to_string())).collect(),
            ))
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use txt_ingest::IngestError;

    fn setup() -> (Registry, Arc<RegexCache>) {
        let cache = Arc::new(RegexCache::new());
        let mut registry = Registry::new();
        register(&mut registry, &cache);
        (registry, cache)
    }

    #[test]
    fn match_reports_bool() {
        let (registry, _) = setup();
        assert_eq!(
            registry.call("match", &[json!(r"^\d+$"), json!("123")]).unwrap(),
            json!(true)
        );
        assert_eq!(
            registry.call("match", &[json!(r"^\d+$"), json!("12a")]).unwrap(),
            json!(false)
        );
    }

    #[test]
    fn find_returns_every_match() {
        let (registry, _) = setup();
        assert_eq!(
            registry.call("find", &[json!(r"\d+"), json!("a1 b22 c333")]).unwrap(),
            json!(["1", "22", "333"])
        );
        assert_eq!(
            registry.call("find", &[json!("z"), json!("abc")]).unwrap(),
            json!([])
        );
    }

    #[test]
    fn replace_expands_groups() {
        let (registry, _) = setup();
        assert_eq!(
            registry
                .call("replace", &[json!(r"(\w+)=(\w+)"), json!("$2=$1"), json!("k=v a=b")])
                .unwrap(),
            json!("v=k b=a")
        );
        assert_eq!(
            registry
                .call("replace", &[json!(r"(?P<word>o+)"), json!("[${word}]"), json!("foo")])
                .unwrap(),
            json!("f[oo]")
        );
    }

    #[test]
    fn split_on_pattern() {
        let (registry, _) = setup();
        assert_eq!(
            registry.call("split", &[json!(r"\s*,\s*"), json!("a , b,c")]).unwrap(),
            json!(["a", "b", "c"])
        );
    }

    #[test]
    fn patterns_share_the_cache() {
        let (registry, cache) = setup();
        registry.call("match", &[json!("x+"), json!("xx")]).unwrap();
        registry.call("find", &[json!("x+"), json!("xx")]).unwrap();
        registry.call("split", &[json!("x+"), json!("axb")]).unwrap();
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
    }

    #[test]
    fn bad_pattern_names_itself() {
        let (registry, cache) = setup();
        let err = registry.call("match", &[json!("("), json!("x")]).unwrap_err();
        assert!(matches!(
            err,
            FuncError::Ingest(IngestError::Pattern { ref pattern, .. }) if pattern == "("
        ));
        assert!(cache.is_empty());
    }
}
