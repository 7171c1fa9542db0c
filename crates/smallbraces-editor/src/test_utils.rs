// ABOUTME: Test utilities providing an in-memory host for view sync tests
// ABOUTME: Records every adornment and re-layout request so tests can assert on them
