//! Field codec: operator text to typed protocol fields.
//!
//! One conversion per [`FieldKind`]. The assembler only ever calls these,
//! so parsing rules live in one place and can be tested without a terminal.

use rust_decimal::Decimal;
use std::str::FromStr;
use tradeprompt_core::field as spec;
use tradeprompt_core::{Error, Field, FieldKind, FieldSpec, Prompt, Result};

/// Prompt for `field_spec` and convert the answer according to its kind.
pub fn query_field<P: Prompt + ?Sized>(prompt: &mut P, field_spec: &FieldSpec) -> Result<Field> {
    let field = match field_spec.kind {
        FieldKind::Identifier => {
            Field::identifier(field_spec.tag, prompt.read_line(field_spec.name)?)
        }
        FieldKind::FreeText => Field::text(field_spec.tag, prompt.read_line(field_spec.name)?),
        FieldKind::Enumeration(_) => {
            let index = prompt.read_choice(field_spec.name, &field_spec.labels())?;
            let code = field_spec
                .code_for(index)
                .ok_or_else(|| Error::InvalidChoice {
                    field: field_spec.name.to_string(),
                    input: index.to_string(),
                })?;
            Field::code(field_spec.tag, code)
        }
        FieldKind::Decimal { scale } => {
            let input = prompt.read_line(field_spec.name)?;
            Field::decimal(field_spec.tag, parse_decimal(field_spec.name, &input)?, scale)
        }
    };
    tracing::debug!(field = field_spec.name, tag = field_spec.tag, "field captured");
    Ok(field)
}

/// Parse a base-10 decimal literal. Surrounding whitespace is ignored.
///
/// Only an optional sign, digits and at most one `.` are accepted; digit
/// separators and exponents are rejected before `Decimal` sees the text.
pub fn parse_decimal(field: &str, input: &str) -> Result<Decimal> {
    let err = || Error::DecimalParse {
        field: field.to_string(),
        input: input.to_string(),
    };
    let text = input.trim();
    if !is_plain_decimal(text) {
        return Err(err());
    }
    Decimal::from_str(text).map_err(|_| err())
}

fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (unsigned, ""),
    };
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    !(int_part.is_empty() && frac_part.is_empty()) && digits(int_part) && digits(frac_part)
}

pub fn query_sender_comp_id<P: Prompt + ?Sized>(prompt: &mut P) -> Result<Field> {
    query_field(prompt, &spec::SENDER_COMP_ID)
}

pub fn query_target_comp_id<P: Prompt + ?Sized>(prompt: &mut P) -> Result<Field> {
    query_field(prompt, &spec::TARGET_COMP_ID)
}

pub fn query_target_sub_id<P: Prompt + ?Sized>(prompt: &mut P) -> Result<Field> {
    query_field(prompt, &spec::TARGET_SUB_ID)
}

pub fn query_cl_ord_id<P: Prompt + ?Sized>(prompt: &mut P) -> Result<Field> {
    query_field(prompt, &spec::CL_ORD_ID)
}

pub fn query_orig_cl_ord_id<P: Prompt + ?Sized>(prompt: &mut P) -> Result<Field> {
    query_field(prompt, &spec::ORIG_CL_ORD_ID)
}

pub fn query_symbol<P: Prompt + ?Sized>(prompt: &mut P) -> Result<Field> {
    query_field(prompt, &spec::SYMBOL)
}

pub fn query_side<P: Prompt + ?Sized>(prompt: &mut P) -> Result<Field> {
    query_field(prompt, &spec::SIDE)
}

pub fn query_ord_type<P: Prompt + ?Sized>(prompt: &mut P) -> Result<Field> {
    query_field(prompt, &spec::ORD_TYPE)
}

pub fn query_time_in_force<P: Prompt + ?Sized>(prompt: &mut P) -> Result<Field> {
    query_field(prompt, &spec::TIME_IN_FORCE)
}

pub fn query_order_qty<P: Prompt + ?Sized>(prompt: &mut P) -> Result<Field> {
    query_field(prompt, &spec::ORDER_QTY)
}

pub fn query_price<P: Prompt + ?Sized>(prompt: &mut P) -> Result<Field> {
    query_field(prompt, &spec::PRICE)
}

pub fn query_stop_px<P: Prompt + ?Sized>(prompt: &mut P) -> Result<Field> {
    query_field(prompt, &spec::STOP_PX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tradeprompt_core::{FieldValue, tag};
    use tradeprompt_prompt::TerminalPrompt;

    fn scripted(input: &str) -> TerminalPrompt<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn equal_decimals_regardless_of_trailing_zeros() {
        let ten = Decimal::from(10);
        for input in ["10", "10.0", "10.00", " 10 ", "10.000"] {
            assert_eq!(parse_decimal("Price", input).unwrap(), ten, "input {input:?}");
        }
    }

    #[test]
    fn malformed_decimals_are_rejected() {
        for input in [
            "", "abc", "1O", "12.3.4", "1,000", "$5", "ten", "1_000", "1_0.5", "1e5", "1E-2",
            "-", ".", "--1", "0x10", "1.5.",
        ] {
            let err = parse_decimal("OrderQty", input).unwrap_err();
            assert!(
                matches!(err, Error::DecimalParse { ref field, .. } if field == "OrderQty"),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn decimal_field_uses_fixed_scale() {
        let mut prompt = scripted("10\n");
        let field = query_price(&mut prompt).unwrap();
        assert_eq!(field.tag, tag::PRICE);
        assert_eq!(field.render(), "44=10.00");

        let mut prompt = scripted("3.14159\n");
        let field = query_order_qty(&mut prompt).unwrap();
        assert_eq!(field.value.render(), "3.14");
        assert!(matches!(field.value, FieldValue::Decimal { scale: 2, .. }));
    }

    #[test]
    fn signed_and_fractional_decimals_parse() {
        assert_eq!(parse_decimal("Price", "-2.5").unwrap(), Decimal::new(-25, 1));
        assert_eq!(parse_decimal("Price", "0.125").unwrap(), Decimal::new(125, 3));
    }

    #[test]
    fn decimal_midpoints_round_away_from_zero() {
        for (input, expected) in [
            ("2.125", "44=2.13"),
            ("1.005", "44=1.01"),
            ("-2.125", "44=-2.13"),
        ] {
            let mut prompt = scripted(&format!("{input}\n"));
            assert_eq!(query_price(&mut prompt).unwrap().render(), expected, "input {input:?}");
        }
    }

    #[test]
    fn identifiers_are_verbatim() {
        let mut prompt = scripted(" DESK 7 \n");
        let field = query_cl_ord_id(&mut prompt).unwrap();
        assert_eq!(field.value, FieldValue::Identifier(" DESK 7 ".into()));
    }

    #[test]
    fn symbol_is_free_text() {
        let mut prompt = scripted("XS2357239057\n");
        let field = query_symbol(&mut prompt).unwrap();
        assert_eq!(field.render(), "55=XS2357239057");
    }

    #[test]
    fn enumeration_maps_index_to_code() {
        let mut prompt = scripted("7\n");
        assert_eq!(query_side(&mut prompt).unwrap().render(), "54=A");

        let mut prompt = scripted("4\n");
        assert_eq!(query_time_in_force(&mut prompt).unwrap().render(), "59=1");

        let mut prompt = scripted("4\n");
        assert_eq!(query_ord_type(&mut prompt).unwrap().render(), "40=4");
    }

    #[test]
    fn enumeration_boundaries_fail_for_every_enum() {
        for field_spec in [spec::SIDE, spec::ORD_TYPE, spec::TIME_IN_FORCE] {
            let n = field_spec.labels().len();
            for bad in [0, n + 1] {
                let mut prompt = scripted(&format!("{bad}\n"));
                let err = query_field(&mut prompt, &field_spec).unwrap_err();
                assert!(matches!(err, Error::InvalidChoice { .. }), "{} {bad}", field_spec.name);
            }
        }
    }

    #[test]
    fn orig_cl_ord_id_is_read_from_operator() {
        let mut prompt = scripted("ORD-1\n");
        let field = query_orig_cl_ord_id(&mut prompt).unwrap();
        assert_eq!(field.render(), "41=ORD-1");
    }

    #[test]
    fn stop_px_prompt_label() {
        let mut prompt = scripted("99.5\n");
        let field = query_stop_px(&mut prompt).unwrap();
        assert_eq!(field.render(), "99=99.50");
        let out = String::from_utf8(prompt.into_output()).unwrap();
        assert_eq!(out, "Stop Price: ");
    }
}
