//! Input validation functions
//!
//! This module provides validation utilities for user input.

/// Validate username
///
/// Usernames are 3-32 characters of letters, digits, dots, underscores
/// and hyphens. They double as persistent record keys, so the alphabet
/// stays narrow.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    if username.len() < 3 {
        return Err("Username must be at least 3 characters".to_string());
    }
    if username.len() > 32 {
        return Err("Username too long".to_string());
    }
    let username_regex = regex_lite::Regex::new(r"^[A-Za-z0-9._-]+$").unwrap();
    if !username_regex.is_match(username) {
        return Err("Username may only contain letters, digits, '.', '_' and '-'".to_string());
    }
    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if !email.contains('@') || !email.contains('.') {
        return Err("Invalid email format".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    // Basic email regex check
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    if !email_regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate student ID (NIM)
///
/// Student IDs are numeric strings between 3 and 20 digits.
pub fn validate_student_id(student_id: &str) -> Result<(), String> {
    if student_id.is_empty() {
        return Err("Student ID cannot be empty".to_string());
    }
    if student_id.len() < 3 || student_id.len() > 20 {
        return Err("Student ID must be 3-20 digits".to_string());
    }
    if !student_id.chars().all(|c| c.is_ascii_digit()) {
        return Err("Student ID must contain only digits".to_string());
    }
    Ok(())
}

/// Validate display name
pub fn validate_display_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if name.len() > 100 {
        return Err("Name too long".to_string());
    }
    Ok(())
}
