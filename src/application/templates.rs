//! Built-in problem templates written by `grind75 init`.
//!
//! Each template carries the `{{PROBLEM_*}}` placeholders understood by
//! [`Placeholders::apply`](crate::domain::Placeholders::apply).

pub const SOLUTION_TEMPLATE: &str = r#"package main

// Problem {{PROBLEM_NUMBER}}: {{PROBLEM_NAME}}
// https://leetcode.com/problems/{{PROBLEM_SLUG}}/

func main() {
	// TODO: Implement your solution here
}
"#;

pub const SOLUTION_TEST_TEMPLATE: &str = r#"package main

import "testing"

func TestSolution(t *testing.T) {
	tests := []struct {
		name     string
		input    interface{}
		expected interface{}
	}{
		// TODO: Add your test cases here
		{
			name:     "Example 1",
			input:    nil,
			expected: nil,
		},
	}

	for _, tt := range tests {
		t.Run(tt.name, func(t *testing.T) {
			// TODO: Implement your test cases
			t.Skip("Test not implemented yet")
		})
	}
}
"#;

pub const README_TEMPLATE: &str = r#"# Problem {{PROBLEM_NUMBER}}: {{PROBLEM_NAME}}

https://leetcode.com/problems/{{PROBLEM_SLUG}}/

## Problem Description
[Add problem description here]

## Solution
[Add solution explanation here]

## Time Complexity
[Add time complexity analysis here]

## Space Complexity
[Add space complexity analysis here]
"#;

/// Default template set as `(file name, content)` pairs.
pub fn default_templates() -> [(&'static str, &'static str); 3] {
    [
        ("solution.go", SOLUTION_TEMPLATE),
        ("solution_test.go", SOLUTION_TEST_TEMPLATE),
        ("README.md", README_TEMPLATE),
    ]
}
