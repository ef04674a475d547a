//! Best-effort statement formatting for display.
//!
//! Works on the `sqlparser` token stream rather than the parsed tree, so it
//! also handles statements that do not parse. Keywords are uppercased,
//! whitespace is normalized and top-level clauses start on their own line.
//! If the text cannot even be tokenized it is returned unchanged.

use sqlparser::{
    dialect::GenericDialect,
    tokenizer::{Token, Tokenizer, Whitespace, Word}
};

const INDENT: &str = "  ";

/// Keywords written in upper case
const KEYWORDS: &[&str] = &[
    "ALL", "AND", "AS", "ASC", "BETWEEN", "BY", "CASE", "CREATE", "CROSS", "DELETE", "DESC",
    "DISTINCT", "DROP", "ELSE", "END", "EXCEPT", "EXISTS", "FROM", "FULL", "GROUP", "HAVING",
    "IN", "INNER", "INSERT", "INTERSECT", "INTO", "IS", "JOIN", "LEFT", "LIKE", "LIMIT",
    "NATURAL", "NOT", "NULL", "OFFSET", "ON", "OR", "ORDER", "OUTER", "RETURNING", "RIGHT",
    "SELECT", "SET", "TABLE", "THEN", "UNION", "UPDATE", "USING", "VALUES", "WHEN", "WHERE",
    "WITH"
];

/// Keywords that open a new top-level clause
const CLAUSES: &[&str] = &[
    "FROM", "WHERE", "GROUP", "ORDER", "HAVING", "LIMIT", "OFFSET", "UNION", "EXCEPT",
    "INTERSECT", "SET", "VALUES", "RETURNING"
];

/// Words that start a join, unless already preceded by one of them
const JOIN_WORDS: &[&str] = &["JOIN", "INNER", "LEFT", "RIGHT", "FULL", "CROSS", "NATURAL"];

/// Format a statement for display.
///
/// # Example
///
/// ```
/// use sql_optimizer::format::format_query;
///
/// let formatted = format_query("select id,name from users where id=1");
/// assert_eq!(formatted, "SELECT\n  id,\n  name\nFROM users\nWHERE id = 1");
/// ```
pub fn format_query(sql: &str) -> String {
    match Tokenizer::new(&GenericDialect {}, sql).tokenize() {
        Ok(tokens) => {
            let mut writer = Writer::default();
            for token in &tokens {
                writer.push(token);
            }
            writer.finish()
        }
        Err(e) => {
            tracing::debug!(error = %e, "tokenizer failed, returning input unchanged");
            sql.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Prev {
    Start,
    Keyword(String),
    Word,
    OpenParen,
    Period,
    Other
}

struct Writer {
    out:            String,
    prev:           Prev,
    depth:          usize,
    line_start:     bool,
    in_select_list: bool,
    select_pending: bool,
    in_between:     bool
}

impl Default for Writer {
    fn default() -> Self {
        Self {
            out:            String::new(),
            prev:           Prev::Start,
            depth:          0,
            line_start:     true,
            in_select_list: false,
            select_pending: false,
            in_between:     false
        }
    }
}

impl Writer {
    fn push(&mut self, token: &Token) {
        match token {
            Token::Whitespace(Whitespace::SingleLineComment {
                comment,
                prefix
            }) => {
                self.comment(&format!("{}{}", prefix, comment.trim_end()));
            }
            Token::Whitespace(Whitespace::MultiLineComment(comment)) => {
                self.comment(&format!("/*{}*/", comment));
            }
            Token::Whitespace(_) | Token::EOF => {}
            Token::Word(word) => self.word(word),
            Token::Comma => {
                self.write(",", false);
                self.prev = Prev::Other;
                if self.depth == 0 && self.in_select_list {
                    self.newline(1);
                }
            }
            Token::LParen => {
                let space = !matches!(self.prev, Prev::Word | Prev::OpenParen | Prev::Period);
                self.before_item();
                self.write("(", space);
                self.depth += 1;
                self.prev = Prev::OpenParen;
            }
            Token::RParen => {
                self.write(")", false);
                self.depth = self.depth.saturating_sub(1);
                self.prev = Prev::Other;
            }
            Token::Period => {
                self.write(".", false);
                self.prev = Prev::Period;
            }
            Token::SemiColon => {
                self.write(";", false);
                self.in_select_list = false;
                self.prev = Prev::Other;
            }
            other => {
                self.before_item();
                let space = !matches!(self.prev, Prev::OpenParen | Prev::Period);
                self.write(&other.to_string(), space);
                self.prev = Prev::Other;
            }
        }
    }

    fn word(&mut self, word: &Word) {
        let upper = word.value.to_ascii_uppercase();
        let keyword = word.quote_style.is_none() && KEYWORDS.contains(&upper.as_str());
        if !keyword {
            self.before_item();
            let space = !matches!(self.prev, Prev::OpenParen | Prev::Period);
            self.write(&word.to_string(), space);
            self.prev = Prev::Word;
            return;
        }

        if self.depth == 0 {
            self.break_before_keyword(&upper);
        }
        if self.select_pending && upper != "DISTINCT" && upper != "ALL" {
            self.before_item();
        }
        let space = !matches!(self.prev, Prev::OpenParen | Prev::Period);
        self.write(&upper, space);

        match upper.as_str() {
            "SELECT" if self.depth == 0 => {
                self.in_select_list = true;
                self.select_pending = true;
            }
            "BETWEEN" => self.in_between = true,
            "AND" => self.in_between = false,
            _ => {}
        }
        self.prev = Prev::Keyword(upper);
    }

    fn break_before_keyword(&mut self, upper: &str) {
        let after_join_word =
            matches!(&self.prev, Prev::Keyword(k) if JOIN_WORDS.contains(&k.as_str()) || k == "OUTER");
        if CLAUSES.contains(&upper) {
            self.in_select_list = false;
            self.select_pending = false;
            self.newline(0);
        } else if upper == "SELECT" && self.prev != Prev::Start {
            let after_set_operator = matches!(
                &self.prev,
                Prev::Keyword(k) if k == "UNION" || k == "ALL" || k == "EXCEPT" || k == "INTERSECT"
            );
            if !after_set_operator {
                self.newline(0);
            }
        } else if JOIN_WORDS.contains(&upper) && !after_join_word {
            self.in_select_list = false;
            self.newline(0);
        } else if upper == "AND" && self.in_between {
            self.in_between = false;
        } else if (upper == "AND" || upper == "OR") && !self.in_select_list {
            self.newline(1);
        }
    }

    /// First item of a SELECT list goes on its own indented line
    fn before_item(&mut self) {
        if self.select_pending {
            self.select_pending = false;
            self.newline(1);
        }
    }

    fn comment(&mut self, text: &str) {
        if !self.line_start {
            self.newline(self.depth.min(1));
        }
        self.out.push_str(text);
        self.newline(0);
        self.prev = Prev::Start;
    }

    fn write(&mut self, text: &str, space: bool) {
        if space && !self.line_start {
            self.out.push(' ');
        }
        self.out.push_str(text);
        self.line_start = false;
    }

    fn newline(&mut self, indent: usize) {
        if self.out.is_empty() {
            return;
        }
        let trimmed = self.out.trim_end_matches(' ').len();
        self.out.truncate(trimmed);
        if !self.out.ends_with('\n') {
            self.out.push('\n');
        }
        for _ in 0..indent {
            self.out.push_str(INDENT);
        }
        self.line_start = true;
    }

    fn finish(self) -> String {
        self.out.trim().to_string()
    }
}
