// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used by the service

// Port Configuration
pub const SKZ_API_PORT: &str = "SKZ_API_PORT";
pub const PORT: &str = "PORT"; // Legacy

// CORS Configuration
pub const SKZ_CORS_ORIGIN: &str = "SKZ_CORS_ORIGIN";
pub const CORS_ORIGIN: &str = "CORS_ORIGIN"; // Legacy

// Storage
pub const SKZ_DATABASE_PATH: &str = "SKZ_DATABASE_PATH";

// Public URLs embedded in emails and API responses
pub const SKZ_BASE_URL: &str = "SKZ_BASE_URL";

// Admin Authentication
pub const ADMIN_PASSWORD: &str = "ADMIN_PASSWORD";
pub const SKZ_COOKIE_SECURE: &str = "SKZ_COOKIE_SECURE";

// Email
pub const RESEND_API_KEY: &str = "RESEND_API_KEY";
pub const EMAIL_FROM: &str = "EMAIL_FROM";
pub const SKZ_NOTIFICATION_EMAIL: &str = "SKZ_NOTIFICATION_EMAIL";

// Contact number behind the WhatsApp links
pub const SKZ_WHATSAPP: &str = "SKZ_WHATSAPP";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";

// System Environment Variables
pub const HOME: &str = "HOME";

// Defaults
pub const DEFAULT_API_PORT: u16 = 4010;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
