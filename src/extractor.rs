use crate::types::{ExtractionResult, MatchType, PageSnapshot};
use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// 在頁面內執行的擷取函式
///
/// 只能是一般函式指標，不能捕捉呼叫端的狀態。
pub type PageScript = fn(&PageSnapshot) -> ExtractionResult;

// 中文結果: "找到约 6,130 条结果"
static LOCALIZED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"找到约\s*([0-9,，]+)\s*条结果").expect("中文樣式編譯失敗")
});

// 英文結果: "About 6,130 results"
static ENGLISH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)About\s*([0-9,]+)\s*results").expect("英文樣式編譯失敗")
});

static LOOSE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9,，]+)\s*(?:条结果|results)").expect("寬鬆樣式編譯失敗")
});

static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("body 選擇器解析失敗"));

static RESULT_STATS_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#result-stats").expect("result-stats 選擇器解析失敗"));

/// 依序嘗試的樣式，第一個命中者勝出
fn tiers() -> [(&'static Regex, MatchType); 3] {
    [
        (&*LOCALIZED_PATTERN, MatchType::Localized),
        (&*ENGLISH_PATTERN, MatchType::English),
        (&*LOOSE_PATTERN, MatchType::Loose),
    ]
}

/// 從頁面可見文字擷取結果數量
pub fn extract_result_count(snapshot: &PageSnapshot) -> ExtractionResult {
    for (pattern, match_type) in tiers() {
        let Some(captures) = pattern.captures(&snapshot.text) else {
            continue;
        };
        let mut digits = strip_separators(&captures[1]);
        // 命中後不再嘗試後面的樣式；只抓到分隔符號時結果數為 0
        if digits.is_empty() {
            digits.push('0');
        }
        return ExtractionResult::matched(digits, match_type, snapshot);
    }

    ExtractionResult::miss(snapshot)
}

/// 去除半形與全形千分位
fn strip_separators(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// 由 HTML 建立頁面快照（只保留可見文字）
pub fn snapshot_from_html(html: &str) -> PageSnapshot {
    let document = Html::parse_document(html);

    let root = document
        .select(&BODY_SELECTOR)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut text = String::new();
    collect_visible_text(root, &mut text);

    let result_stats = document
        .select(&RESULT_STATS_SELECTOR)
        .next()
        .map(collect_text)
        .filter(|s| !s.is_empty());

    PageSnapshot { text, result_stats }
}

fn collect_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    collect_visible_text(element, &mut text);
    text.trim().to_string()
}

fn collect_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(elem) => {
                let name = elem.name();
                if is_hidden(name) {
                    continue;
                }
                let Some(child_elem) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = is_block(name);
                if block {
                    out.push('\n');
                }
                collect_visible_text(child_elem, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

fn is_hidden(name: &str) -> bool {
    matches!(name, "script" | "style" | "noscript" | "template" | "head")
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "br" | "div" | "p" | "li" | "ul" | "ol" | "tr" | "table" | "section" | "article"
            | "header" | "footer" | "nav" | "main" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
    )
}
