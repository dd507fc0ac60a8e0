use crate::form::FormState;

const START_Y: i32 = 30;
const LINE_HEIGHT: i32 = 20;
const LEFT_PADDING: f32 = 15.0;
const RIGHT_PADDING: f32 = 30.0;
const CHAR_WIDTH: f32 = 9.6;
const MIN_COL_CHARS: usize = 30;
const PLACEHOLDER: &str = "--";

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub key: &'static str,
    pub value: &'static str,
    pub cc: &'static str,
    pub error: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#161b22",
                text: "#c9d1d9",
                key: "#ffa657",
                value: "#a5d6ff",
                cc: "#616e7f",
                error: "#f85149",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                text: "#24292f",
                key: "#d73a49",
                value: "#0366d6",
                cc: "#6a737d",
                error: "#cf222e",
            },
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Splits a row into key, dot leader and value so values line up at `align_width`.
pub fn build_stat_row(key: &str, value: &str, align_width: usize) -> (String, String, String) {
    let key_part = format!("{key}: ");
    let base_len = key_part.len() + value.len();
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => ".".repeat(n),
    };

    (key_part, dots, value.to_string())
}

fn build_header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(base.len()) + 2;
    format!("{base}{}", "-".repeat(dash_count))
}

enum Line {
    Stat { key: &'static str, value: String },
    Error(String),
}

fn lines_for(state: &FormState) -> Vec<Line> {
    let stats = |years: String, months: String, days: String| {
        vec![
            Line::Stat {
                key: "Years",
                value: years,
            },
            Line::Stat {
                key: "Months",
                value: months,
            },
            Line::Stat {
                key: "Days",
                value: days,
            },
        ]
    };

    match state {
        FormState::Idle => stats(
            PLACEHOLDER.to_string(),
            PLACEHOLDER.to_string(),
            PLACEHOLDER.to_string(),
        ),
        FormState::Settled(Ok(age)) => stats(
            age.years.to_string(),
            age.months.to_string(),
            age.days.to_string(),
        ),
        FormState::Settled(Err(err)) => vec![Line::Error(err.to_string())],
    }
}

/// Renders the form's output surface as a themed SVG card.
pub fn generate_svg(state: &FormState, theme: Theme) -> String {
    let colors = theme.colors();
    let lines = lines_for(state);

    let align_width = lines
        .iter()
        .map(|line| match line {
            Line::Stat { key, value } => key.len() + 2 + value.len(),
            Line::Error(message) => message.len(),
        })
        .max()
        .unwrap_or(0)
        .max(MIN_COL_CHARS);

    let header = build_header_line("age", align_width);
    let mut tspans = format!(
        "<tspan x=\"{LEFT_PADDING}\" y=\"{START_Y}\">{}</tspan>\n",
        escape_xml(&header)
    );

    for (i, line) in lines.iter().enumerate() {
        let y = START_Y + (i as i32 + 1) * LINE_HEIGHT;
        match line {
            Line::Stat { key, value } => {
                let (k, d, v) = build_stat_row(key, value, align_width);
                tspans.push_str(&format!(
                    r#"<tspan x="{LEFT_PADDING}" y="{y}" class="cc">. </tspan>
<tspan class="key">{}</tspan><tspan class="cc">{}</tspan><tspan class="value">{}</tspan>
"#,
                    escape_xml(&k),
                    escape_xml(&d),
                    escape_xml(&v)
                ));
            }
            Line::Error(message) => {
                tspans.push_str(&format!(
                    r#"<tspan x="{LEFT_PADDING}" y="{y}" class="error">{}</tspan>
"#,
                    escape_xml(message)
                ));
            }
        }
    }

    // The leading ". " adds two characters to each row.
    let w = LEFT_PADDING + (align_width as f32 + 2.0) * CHAR_WIDTH + RIGHT_PADDING;
    let h = (lines.len() as f32 + 1.0) * LINE_HEIGHT as f32 + START_Y as f32;

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px"
     font-family="ConsolasFallback,Consolas,monospace"
     font-size="16px">

<style>
.key      {{ fill: {key}; }}
.value    {{ fill: {value}; }}
.cc       {{ fill: {cc}; }}
.error    {{ fill: {error}; }}
</style>

<rect width="{w}px" height="{h}px" fill="{bg}" rx="15"/>

<text fill="{text}" xml:space="preserve">
{tspans}
</text>

</svg>
"#,
        bg = colors.bg,
        text = colors.text,
        key = colors.key,
        value = colors.value,
        cc = colors.cc,
        error = colors.error,
    )
}
