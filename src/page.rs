//! Rendering of the HTML info page served on the root route.

use crate::info::ServerInfo;

// Style and script are kept outside the `format!` template, the braces
// in CSS and JS must not collide with format placeholders.
const STYLE: &str = r"
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            margin: 0;
            padding: 40px;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
            color: #333;
        }
        .container {
            max-width: 900px;
            margin: 0 auto;
            background-color: white;
            padding: 40px;
            border-radius: 15px;
            box-shadow: 0 10px 30px rgba(0,0,0,0.2);
        }
        h1 {
            color: #2c3e50;
            text-align: center;
            margin-bottom: 10px;
            font-size: 2.5em;
            font-weight: 300;
        }
        .language-badge {
            display: inline-block;
            background: linear-gradient(45deg, #dea584, #b7410e);
            color: white;
            padding: 8px 16px;
            border-radius: 25px;
            font-size: 0.9em;
            font-weight: bold;
            margin-left: 10px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.2);
        }
        h2 {
            color: #34495e;
            border-bottom: 3px solid #3498db;
            padding-bottom: 10px;
            margin-top: 40px;
        }
        .info-grid {
            display: grid;
            grid-template-columns: auto 1fr;
            gap: 15px 25px;
            margin: 25px 0;
            background: linear-gradient(135deg, #f8f9fa, #e9ecef);
            padding: 25px;
            border-radius: 10px;
            border-left: 5px solid #3498db;
        }
        .info-label {
            font-weight: bold;
            color: #2c3e50;
        }
        .info-value {
            color: #34495e;
        }
        a {
            color: #3498db;
            text-decoration: none;
            font-weight: 500;
            transition: all 0.3s ease;
        }
        a:hover {
            color: #2980b9;
            text-decoration: underline;
        }
        #browser {
            background: linear-gradient(135deg, #e8f4f8, #d1ecf1);
            padding: 20px;
            border-radius: 10px;
            margin-top: 15px;
            border-left: 5px solid #17a2b8;
            font-family: 'Courier New', monospace;
            font-size: 0.9em;
        }
        .footer {
            text-align: center;
            margin-top: 40px;
            padding-top: 20px;
            border-top: 1px solid #dee2e6;
            color: #6c757d;
            font-size: 0.9em;
        }
";

const SCRIPT: &str = r"
            const browserInfo = document.getElementById('browser');
            const info = [
                '<strong>User-Agent:</strong> ' + navigator.userAgent,
                '<strong>Platform:</strong> ' + navigator.platform,
                '<strong>Language:</strong> ' + navigator.language,
                '<strong>Languages:</strong> ' + navigator.languages.join(', '),
                '<strong>Cookies enabled:</strong> ' + navigator.cookieEnabled,
                '<strong>Screen resolution:</strong> ' + screen.width + 'x' + screen.height,
                '<strong>Color depth:</strong> ' + screen.colorDepth + ' bits',
                '<strong>Timezone:</strong> ' + Intl.DateTimeFormat().resolvedOptions().timeZone,
                '<strong>Online status:</strong> ' + (navigator.onLine ? 'Online' : 'Offline'),
                '<strong>Hardware concurrency:</strong> ' + (navigator.hardwareConcurrency || 'Unknown') + ' cores'
            ];
            browserInfo.innerHTML = info.join('<br>');
";

/// Renders the info page for the given snapshot of server metadata.
#[must_use]
pub(crate) fn render(info: &ServerInfo) -> String {
    format!(
        "<!DOCTYPE html>\n\
<html lang=\"en\">\n\
<head>\n\
    <meta charset=\"UTF-8\">\n\
    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
    <title>Rust Web Server</title>\n\
    <style>{style}    </style>\n\
</head>\n\
<body>\n\
    <div class=\"container\">\n\
        <h1>Hello, World! <span class=\"language-badge\">Rust</span></h1>\n\
\n\
        <h2>Server Information</h2>\n\
        <div class=\"info-grid\">\n\
            <span class=\"info-label\">Port:</span>\n\
            <span class=\"info-value\">{port}</span>\n\
            <span class=\"info-label\">Platform:</span>\n\
            <span class=\"info-value\">{platform}</span>\n\
            <span class=\"info-label\">Operating System:</span>\n\
            <span class=\"info-value\">{os}</span>\n\
            <span class=\"info-label\">Rust Version:</span>\n\
            <span class=\"info-value\">{rust_version}</span>\n\
            <span class=\"info-label\">Architecture:</span>\n\
            <span class=\"info-value\">{architecture}</span>\n\
            <span class=\"info-label\">API Endpoint:</span>\n\
            <span class=\"info-value\"><a href='/api'>/api</a></span>\n\
        </div>\n\
\n\
        <h2>Browser Information</h2>\n\
        <div id='browser'>\n\
            <em>JavaScript required to display browser information</em>\n\
        </div>\n\
\n\
        <div class=\"footer\">\n\
            <p>Multi-Language Web Server Collection | Rust Implementation</p>\n\
        </div>\n\
\n\
        <script>{script}        </script>\n\
    </div>\n\
</body>\n\
</html>\n",
        style = STYLE,
        script = SCRIPT,
        port = info.port,
        platform = info.platform,
        os = info.os,
        rust_version = info.rust_version,
        architecture = info.architecture,
    )
}
