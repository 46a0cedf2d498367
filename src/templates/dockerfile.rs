//! Dockerfile template.

/// Runtime image the app is built on.
pub const BASE_IMAGE: &str = "serversideup/php:8.3-fpm-nginx";

/// Render the Dockerfile.
///
/// When `post_build_command` is given, a final `RUN` step executes it
/// verbatim.
pub fn generate_dockerfile(post_build_command: Option<&str>) -> String {
    let mut dockerfile = format!(
        r#"FROM {BASE_IMAGE}

ENV PHP_OPCACHE_ENABLE=1

USER root

# Install Node.js
RUN curl -sL https://deb.nodesource.com/setup_20.x | bash -
RUN apt-get install -y nodejs

# Install PHP intl and exif extensions
RUN apt-get update && apt-get install -y \
    libicu-dev \
    libexif-dev \
    && docker-php-ext-install intl exif

COPY --chown=www-data:www-data . /var/www/html

USER www-data

RUN npm install
RUN npm run build

RUN composer install --no-interaction --optimize-autoloader
"#
    );

    if let Some(command) = post_build_command {
        dockerfile.push_str(&format!("\n# Run migrations and seeds\nRUN {}\n", command));
    }

    dockerfile
}
