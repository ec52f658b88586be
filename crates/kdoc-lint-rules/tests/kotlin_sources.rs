//! Rules driven end to end through the Kotlin extractor.

use kdoc_lint_core::{Analyzer, RuleBox, Violation};
use kdoc_lint_rules::{
    recommended_rules, FileHeader, ForbiddenLogCall, FunctionDoc, IssueKind, TooManyFunctions,
};
use kdoc_lint_ts::KotlinExtractor;
use std::path::Path;

const HEADER: &str = "/**
 * Copyright Tandem Diabetes Care, Inc. 2018-2020. All rights reserved.
 * DeviceModel.kt
 * This class represents the device model of the phone itself.
 * @author Mitchell Thornton Feb 28, 2018
 */
";

fn lint(rules: Vec<RuleBox>, file: &str, source: &str) -> Vec<Violation> {
    let mut builder = Analyzer::builder()
        .root("/project")
        .extractor(KotlinExtractor::new());
    for rule in rules {
        builder = builder.rule_box(rule);
    }
    builder
        .build()
        .unwrap()
        .check_source(Path::new(file), source)
        .unwrap()
}

fn doc_codes(source: &str) -> Vec<String> {
    lint(vec![Box::new(FunctionDoc::new())], "DeviceModel.kt", source)
        .into_iter()
        .map(|v| v.code)
        .collect()
}

#[test]
fn clean_file_passes_recommended_rules() {
    let source = format!(
        "{HEADER}package com.example.models

import com.example.logging.TLog

object DeviceModel {{

    /**
     * Sets the state of the network connection to connected.
     */
    @Synchronized
    fun setNetworkConnected() {{
        TLog.d(TAG, \"Network connected\")
    }}

    /**
     * Returns the value of the network connection.
     * @param refresh query the connectivity manager again
     * @return Boolean? true when a network is available
     */
    fun getNetworkStatus(refresh: Boolean): Boolean? {{
        return hasNetwork
    }}
}}
"
    );
    assert!(lint(recommended_rules(), "DeviceModel.kt", &source).is_empty());
}

#[test]
fn doc_block_with_params_return_and_throws() {
    let source = "/**
 * This only validates the site change.
 * @param test this is a test param
 * @return Boolean - returns true if and only if all of the site change is valid.
 * @throws test this is a throw
 */
fun isSiteChangeSet(test: Boolean): Boolean {
    throw IllegalArgumentException(\"Test Test\")
    return siteChangeThreshold != 0
}
";
    assert!(doc_codes(source).is_empty());
}

#[test]
fn doc_block_multi_line_description_and_param() {
    let source = "/**
 * This only validates the site change.
 * This only validates the site change.
 *
 * 1. This only validates the site change.
 * @param test this is a test param.....
 * That continues onto the next line
 */
fun isSiteChangeSet(test: Boolean) {
}
";
    assert!(doc_codes(source).is_empty());
}

#[test]
fn missing_doc_block_is_one_issue() {
    let source = "fun isSiteChangeSet(test: Boolean): Boolean {
    return siteChangeThreshold != 0
}
";
    assert_eq!(doc_codes(source), vec![IssueKind::DocBlockMissing.code()]);
}

#[test]
fn each_doc_mismatch_is_one_issue() {
    let sources = [
        // missing description
        "/**
 * @param test this is a test param
 * @return Boolean - returns true if the site change is valid.
 */
fun isSiteChangeSet(test: Boolean): Boolean {
    return siteChangeThreshold != 0
}
",
        // second parameter undocumented
        "/**
 * This only validates the site change.
 * @param test this is a test param
 * @return Boolean - returns true if the site change is valid.
 */
fun isSiteChangeSet(test: Boolean, testTwo: Boolean): Boolean {
    return siteChangeThreshold != 0
}
",
        // missing return
        "/**
 * This only validates the site change.
 * @param test this is a test param
 */
fun isSiteChangeSet(test: Boolean): Boolean {
    return siteChangeThreshold != 0
}
",
        // two throw sites, one documented
        "/**
 * This only validates the site change.
 * @throws This is a test throw
 */
fun isSiteChangeSet() {
    throw IllegalArgumentException(\"Test Throw\")
    throw IllegalArgumentException(\"Test Throw\")
}
",
        // extra return for a Unit function
        "/**
 * This only validates the site change.
 * @return Unit - nothing is returned from here
 */
fun isSiteChangeSet() {
}
",
    ];
    for source in sources {
        assert_eq!(
            doc_codes(source),
            vec![IssueKind::DocBlockMismatch.code()],
            "{source}"
        );
    }
}

#[test]
fn header_must_name_the_file() {
    let source = format!("{HEADER}package com.example.models\n");
    let violations = lint(vec![Box::new(FileHeader::new())], "Other.kt", &source);
    assert_eq!(violations.len(), 1);
    insta::assert_snapshot!(violations[0].format().trim_end(), @r#"
    TOFIB004 file-header at Other.kt:1:1
      error: File name does not match expected: expected "Other.kt"
      = note: line 3: file-name line expected here
      = help: Ex:
     * Other.kt
    "#);
}

#[test]
fn file_without_header() {
    let violations = lint(
        vec![Box::new(FileHeader::new())],
        "DeviceModel.kt",
        "package com.example.models\n",
    );
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].code, IssueKind::HeaderMalformed.code());
}

#[test]
fn header_after_byte_order_mark() {
    let source = format!("\u{feff}{HEADER}package com.example.models\n");
    assert!(lint(vec![Box::new(FileHeader::new())], "DeviceModel.kt", &source).is_empty());
}

#[test]
fn log_calls_and_allow_directive() {
    let source = format!(
        "{HEADER}package com.example.models

import android.util.Log

fun connect() {{
    Log.d(TAG, \"connecting\")
    // kdoc-lint: allow(forbidden-log-call) reason=\"crash path before TLog is up\"
    Log.wtf(TAG, \"no logger\")
    TLog.i(TAG, \"connected\")
}}
"
    );
    let violations = lint(vec![Box::new(ForbiddenLogCall::new())], "DeviceModel.kt", &source);
    let lines: Vec<_> = violations.iter().map(|v| v.location.line).collect();
    assert_eq!(lines, vec![12]);
    assert_eq!(violations[0].message, "android.util.Log usage is forbidden");
}

#[test]
fn function_count_is_per_file() {
    let rules = || -> Vec<RuleBox> { vec![Box::new(TooManyFunctions::new())] };
    let three = "fun a() {}\nfun b() {}\nfun c() {}\n";
    let one = "fun a() {}\n";
    assert_eq!(lint(rules(), "Three.kt", three).len(), 1);
    assert!(lint(rules(), "One.kt", one).is_empty());
}
