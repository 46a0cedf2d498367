//! Container entrypoint script.
//!
//! Waits for the `mysql` service, runs the post-build command if any, then
//! starts php-fpm and nginx in the foreground.

/// Render the entrypoint script.
pub fn generate_entrypoint(post_build_command: Option<&str>) -> String {
    let mut script = String::from(
        r#"#!/bin/sh

# Wait for MySQL to be ready
while ! mysqladmin ping -h mysql -u root -p"$DB_PASSWORD" --silent; do
    echo "Waiting for database connection..."
    sleep 2
done
"#,
    );

    if let Some(command) = post_build_command {
        script.push_str(&format!("\n# Run migrations and seeds\n{}\n", command));
    }

    script.push_str("\n# Start PHP-FPM and Nginx\nphp-fpm -D && nginx -g 'daemon off;'\n");
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entrypoint_without_commands() {
        let script = generate_entrypoint(None);
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains("mysqladmin ping -h mysql"));
        assert!(!script.contains("artisan"));
        assert!(script.ends_with("nginx -g 'daemon off;'\n"));
    }

    #[test]
    fn test_entrypoint_runs_command_before_server() {
        let script = generate_entrypoint(Some("php artisan migrate --force"));
        let migrate = script.find("php artisan migrate --force").unwrap();
        let server = script.find("php-fpm -D").unwrap();
        assert!(migrate < server);
    }
}
