//! Bootstrap programs preloaded into the register bank
//!
//! These are ordinary programs in the calculator language. Loops re-enter
//! themselves by reading their own register and dropping the prefix that
//! precedes the loop body (`<offset> <register> -`), so offsets are computed
//! from the text rather than written by hand.

/// Register whose text is the initial tape
pub const BOOT_REGISTER: char = 'a';

/// Interactive loop
pub const INTERACTIVE_LOOP: char = 'a';

/// String analysis program
pub const STRING_ANALYSIS: char = 'b';

/// Conditional helper
pub const CONDITIONAL: char = 'c';

/// `cond (then) (else) c@` runs `then` if `cond` is truthy, else `else`.
///
/// Copies the condition, tests it, and deletes the branch not taken along
/// with the condition before applying the survivor.
pub const CONDITIONAL_HELPER: &str = "3!_1+$2$@";

/// Writes a newline: an empty string extended by character 10
const NEWLINE: &str = r#"()10*""#;

/// Prompt, read a line, run it, report the depth, repeat; an empty line ends.
///
/// The input is coerced to a string (`()+`) so numeric input such as `0` is
/// executed rather than mistaken for the empty line.
pub fn interactive_loop() -> String {
    let banner = format!(
        r#"(Postfix calculator)"{nl}(Enter a program per line, an empty line quits)"{nl}"#,
        nl = NEWLINE
    );
    let offset = banner.chars().count();
    let body = format!(
        r##"(> )"'()+1!_(1$(Goodbye!)"{nl})(@(Stack size: )"#"{nl}{offset}{reg}-@){cond}@"##,
        nl = NEWLINE,
        offset = offset,
        reg = INTERACTIVE_LOOP,
        cond = CONDITIONAL,
    );
    banner + &body
}

/// Read a line and classify it character by character.
///
/// Leaves `[reversed, letters, digits, whitespace, special]` on the stack and
/// prints the same figures. Works on ASCII input; characters with codes above
/// 128 cannot be re-attached by `*` and blank the reversed string.
///
/// Stack layout while looping (bottom to top):
/// `reversed letters digits whitespace special rest`
pub fn string_analysis() -> String {
    let setup = format!(
        r#"(String analysis)"{nl}(Enter a line to analyze: )"'()+()0 0 0 0 6!7$"#,
        nl = NEWLINE
    );
    let offset = setup.chars().count();

    let report = format!(
        r#"1$(Reversed: )"5!"{nl}(Letters: )"4!"{nl}(Digits: )"3!"{nl}(Whitespace: )"2!"{nl}(Special: )"1!"{nl}"#,
        nl = NEWLINE
    );

    // code of the first character, then one flag per class
    let classify = concat!(
        "1!0%",
        "1!64>2!91<&2!96>3!123<&|",
        "2!47>3!58<&",
        "3!32=4!9=|",
        "1!3!5!||_",
    );
    // new reversed string, then each counter plus its flag, then the rest
    let update = format!("5!12!*{}1 12!-", "5!12!+".repeat(4));
    let discard = "7$".repeat(11);
    let step = format!(
        "{classify}{update}{discard}{offset}{reg}-@",
        reg = STRING_ANALYSIS
    );

    format!("{setup}1!_({report})({step}){cond}@", cond = CONDITIONAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_offset_points_at_body() {
        let program = interactive_loop();
        let body: String = program.chars().skip(81).collect();
        assert!(body.starts_with(r#"(> )""#));
        assert!(program.ends_with("81a-@)c@"));
    }

    #[test]
    fn test_analysis_offset_points_at_loop() {
        let program = string_analysis();
        let setup_len = program.find("1!_(").unwrap();
        assert!(program.contains(&format!("{}b-@", setup_len)));
    }

    #[test]
    fn test_parens_balance() {
        for program in [interactive_loop(), string_analysis()] {
            let mut depth = 0i32;
            for c in program.chars() {
                match c {
                    '(' => depth += 1,
                    ')' => depth -= 1,
                    _ => {}
                }
                assert!(depth >= 0);
            }
            assert_eq!(depth, 0);
        }
    }
}
