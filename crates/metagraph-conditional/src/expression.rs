use metagraph_core::{fail, Element, ElementSet, MessageKey, MetagraphError, Result};

/// Validates a logical expression over propositions without evaluating it.
///
/// The expression is tokenised by treating `.`, `|`, `!`, `(`, `)` as
/// separators (the connectives this domain's expressions are built from);
/// every resulting non-empty token must name one of `propositions` (compared
/// by its [`ToString`] form). The expression is never parsed into an AST or
/// evaluated against an interpretation — tokens are checked for membership,
/// nothing more.
///
/// # Errors
/// Returns [`MetagraphError::InvalidArgument`] if any token is not a known
/// proposition.
pub fn validate_expression<X>(expression: &str, propositions: &ElementSet<X>) -> Result<()>
where
    X: Element + ToString,
{
    let mut cleaned = String::with_capacity(expression.len());
    for ch in expression.chars() {
        match ch {
            '.' | '|' | '!' | '(' | ')' => cleaned.push(' '),
            other => cleaned.push(other),
        }
    }

    for token in cleaned.split(' ') {
        if token.is_empty() {
            continue;
        }
        if !propositions.iter().any(|p| p.to_string() == token) {
            return fail(MetagraphError::invalid_argument(
                "logical_expression",
                MessageKey::ArgumentsInvalid,
            ));
        }
    }
    Ok(())
}
