//! Input validation functions
//!
//! Boundary checks applied before requests reach business logic. Schema
//! shape is enforced by serde; these cover the range constraints.

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
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

/// Validate age in years
pub fn validate_age(age: i32) -> Result<(), String> {
    if !(13..=120).contains(&age) {
        return Err("Age must be between 13 and 120".to_string());
    }
    Ok(())
}

/// Validate height in centimeters
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if !height_cm.is_finite() || height_cm <= 0.0 || height_cm > 300.0 {
        return Err("Height must be between 0 and 300 cm".to_string());
    }
    Ok(())
}

/// Validate weight in kilograms
pub fn validate_weight_kg(weight_kg: f64) -> Result<(), String> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 || weight_kg > 1000.0 {
        return Err("Weight must be between 0 and 1000 kg".to_string());
    }
    Ok(())
}

/// Validate a plan duration in weeks
pub fn validate_duration_weeks(weeks: i32) -> Result<(), String> {
    if !(1..=52).contains(&weeks) {
        return Err("Duration must be between 1 and 52 weeks".to_string());
    }
    Ok(())
}

/// Validate a 1-5 plan rating
pub fn validate_rating(rating: i32) -> Result<(), String> {
    if !(1..=5).contains(&rating) {
        return Err("Rating must be between 1 and 5".to_string());
    }
    Ok(())
}

/// Validate a completion percentage
pub fn validate_completion_percentage(value: f64) -> Result<(), String> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err("Completion percentage must be between 0 and 100".to_string());
    }
    Ok(())
}

/// Validate a calorie value
pub fn validate_calories(calories: f64) -> Result<(), String> {
    if !calories.is_finite() || calories < 0.0 {
        return Err("Calories cannot be negative".to_string());
    }
    if calories > 50000.0 {
        return Err("Calorie value unreasonably high".to_string());
    }
    Ok(())
}
