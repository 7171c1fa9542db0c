// ABOUTME: Test module organization for the smallbraces facade
// ABOUTME: End-to-end scenarios, fault containment, configuration loading and preview output

pub mod preview_tests;
